//! Simplex decompositions of convex cells.

pub use self::decomposition::{
    push_face_edges, push_fan_tetrahedra, push_fan_triangles, Decomposition,
};

mod decomposition;
