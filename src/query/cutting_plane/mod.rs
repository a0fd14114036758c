//! Volume-fraction plane solvers.
//!
//! All the solvers follow the same recipe. The region to cut is given as a set of simplices
//! (triangles or tetrahedra). Its vertices are projected on the plane normal, which yields
//! sorted levels. Between two consecutive levels, the area (2D) or volume (3D) swept by a
//! plane moving along the normal is a polynomial of the plane position. This piecewise
//! polynomial is integrated and a Newton search finds the position where the swept
//! measure matches the requested fraction.
//!
//! The returned offset follows the sign convention of the cutters: a point `p` is "inside"
//! (on the side of the requested fraction) iff `dot(p, normal) + offset <= 0`.

pub use self::cutting_cone_triangles::cutting_cone_triangles;
pub use self::cutting_plane_tetrahedra::cutting_plane_tetrahedra;
pub use self::cutting_plane_triangles::cutting_plane_triangles;
pub use self::piecewise::PiecewisePolynomial;

use self::piecewise::SweepLevels;
use crate::math::{Point, Real, Vector};

mod cutting_cone_triangles;
mod cutting_plane_tetrahedra;
mod cutting_plane_triangles;
mod piecewise;

/// The translation and uniform scaling applied to cell coordinates before solving.
///
/// Working on coordinates of unit magnitude keeps the polynomial coefficients well
/// conditioned for both tiny and huge cells.
#[derive(Copy, Clone, Debug)]
struct SweepFrame {
    origin: Point<Real>,
    scale: Real,
}

impl SweepFrame {
    fn new(origin: Point<Real>, vertices: &[Point<Real>]) -> Self {
        let mut mins = origin;
        let mut maxs = origin;

        for pt in vertices {
            mins = mins.inf(pt);
            maxs = maxs.sup(pt);
        }

        let extents = maxs - mins;
        Self {
            origin,
            scale: extents.x.max(extents.y).max(extents.z),
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.scale > 0.0)
    }

    fn to_local(&self, pt: &Point<Real>) -> Point<Real> {
        Point::from((pt - self.origin) / self.scale)
    }

    /// Converts a plane position in local coordinates into a plane offset in world coordinates.
    fn to_offset(&self, normal: &Vector<Real>, local_position: Real) -> Real {
        -(normal.dot(&self.origin.coords) + local_position * self.scale)
    }
}

/// The levels of `vertices` along `normal`, and the levels sorted in increasing order.
fn sweep_levels(normal: &Vector<Real>, vertices: &[Point<Real>]) -> (Vec<Real>, SweepLevels) {
    let heights: Vec<Real> = vertices.iter().map(|p| normal.dot(&p.coords)).collect();
    let levels = SweepLevels::new(&heights);
    (heights, levels)
}
