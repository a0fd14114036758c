//! Cells and the elementary shapes used to measure them.

pub use self::cell_type::CellType;
pub use self::convex_point_set::{convex_point_set_faces, ConvexFaces};
pub use self::tetrahedron::Tetrahedron;
pub use self::triangle::Triangle;

mod cell_type;
mod convex_point_set;
mod tetrahedron;
mod triangle;
