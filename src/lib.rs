/*!
youngs
========

**youngs** reconstructs material interfaces inside mixed-material mesh cells, in the
style of Youngs' volume-of-fluid method.

Each mixed cell carries, for every material, a volume fraction and an interface normal.
Materials are processed one after another: a plane orthogonal to the material normal is placed
so that it cuts off exactly the requested fraction of what remains of the cell, the material's
interface (or filled region) is emitted, and the leftover sub-cell is handed to the next
material.

The crate is organized bottom-up:

* [`utils`]: polynomial kernel, edge keys, hash-maps.
* [`shape`]: cell kinds, triangles, tetrahedra and convex point sets.
* [`transformation`]: simplex decompositions of convex cells.
* [`query`]: the volume-fraction plane solvers and the polygon/polyhedron cutters.
* [`interface`]: the per-cell material loop and the mesh-level driver.
* [`mesh`]: a plain-array unstructured mesh used at the crate boundary.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)]
#![deny(unused_qualifications)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod interface;
pub mod mesh;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    pub use f64 as Real;
}

/// Aliases for the mathematical types used throughout this crate.
///
/// Cells of every dimension store their points in 3D space: 2D cells live in a plane of the
/// source mesh, usually `z = 0`.
pub mod math {
    pub use super::real::*;
    pub use na::{Point2, Point3, Vector2, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The maximum number of points a cell may have, including the points created by
    /// successive cuts.
    pub const MAX_CELL_POINTS: usize = 128;

    /// The number of Newton iterations performed by the plane solvers.
    pub const NEWTON_ITERATIONS: usize = 32;
}
