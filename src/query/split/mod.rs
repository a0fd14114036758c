//! Splitting of convex cells by a plane.
//!
//! A point `p` is on the inside of the plane iff `dot(p, normal) + offset <= 0`. Both splits
//! return the inside part, the outside part and the interface points created on the cell
//! edges crossed by the plane. They return `None` if the plane does not cross the cell.

pub use self::split::{InterfacePoint, PolygonSplit, PolygonVertex, PolyhedronSplit};
pub use self::split_polygon::split_polygon;
pub use self::split_polyhedron::split_polyhedron;

mod split;
mod split_polygon;
mod split_polyhedron;
