//! Non-persistent geometric queries on convex cells.
//!
//! * [`cutting_plane`] places a plane orthogonal to a given normal so that it cuts off a
//!   given fraction of the area or volume of a convex cell.
//! * [`split`] splits a convex polygon or polyhedron by such a plane.

pub use self::cutting_plane::{
    cutting_cone_triangles, cutting_plane_tetrahedra, cutting_plane_triangles,
    PiecewisePolynomial,
};
pub use self::split::{
    split_polygon, split_polyhedron, InterfacePoint, PolygonSplit, PolygonVertex,
    PolyhedronSplit,
};

pub mod cutting_plane;
pub mod split;
