//! A plain-array unstructured mesh, used to feed cells to the reconstruction and to collect
//! the per-material results.

pub use self::data_array::{DataArray, PointAttributes};
pub use self::unstructured_mesh::UnstructuredMesh;

mod data_array;
mod unstructured_mesh;
