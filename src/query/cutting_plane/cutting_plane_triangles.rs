use super::{sweep_levels, SweepFrame};
use crate::math::{Point, Real, Vector};
use crate::query::PiecewisePolynomial;
use crate::utils::{lerp_by_level, Linear};

/// Computes the offset of the plane orthogonal to `normal` that cuts off `fraction` of the
/// area of a planar polygon decomposed into `triangles`.
///
/// The polygon points with `dot(p, normal) + offset <= 0` carry the requested fraction of
/// the area. `normal` does not need to be normalized but must not be orthogonal to the
/// plane of the polygon.
///
/// # Example
///
/// ```
/// use youngs::math::{Point, Vector};
/// use youngs::query::cutting_plane_triangles;
///
/// let square = [
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(1.0, 1.0, 0.0),
///     Point::new(0.0, 1.0, 0.0),
/// ];
/// let triangles = [[0, 1, 2], [0, 2, 3]];
///
/// let offset = cutting_plane_triangles(&Vector::x(), 0.5, &square, &triangles);
/// assert!((offset + 0.5).abs() < 1.0e-9);
/// ```
pub fn cutting_plane_triangles(
    normal: &Vector<Real>,
    fraction: Real,
    vertices: &[Point<Real>],
    triangles: &[[u32; 3]],
) -> Real {
    let Some(origin) = vertices.first() else {
        return 0.0;
    };

    let frame = SweepFrame::new(*origin, vertices);
    if frame.is_degenerate() {
        return frame.to_offset(normal, 0.0);
    }

    let local: Vec<_> = vertices.iter().map(|p| frame.to_local(p)).collect();
    let (heights, levels) = sweep_levels(normal, &local);
    let mut lengths = PiecewisePolynomial::<2>::new(levels.levels.clone());

    for tri in triangles {
        let [i0, i1, i2] = levels.sort_simplex(tri);
        let (p0, p1, p2) = (local[i0 as usize], local[i1 as usize], local[i2 as usize]);
        let (d0, d1, d2) = (
            heights[i0 as usize],
            heights[i1 as usize],
            heights[i2 as usize],
        );

        // Length of the widest section, at the level of the middle vertex.
        let mid = lerp_by_level(d0, &p0, d2, &p2, d1);
        let length = (p1 - mid).norm();

        if d1 > d0 {
            let rising = Linear::new([length / (d1 - d0), -length * d0 / (d1 - d0)]);
            lengths.add_on(levels.intervals(i0, i1), rising);
        }

        if d2 > d1 {
            let falling = Linear::new([-length / (d2 - d1), d2 * length / (d2 - d1)]);
            lengths.add_on(levels.intervals(i1, i2), falling);
        }
    }

    let position = lengths.solve::<3>(fraction);
    frame.to_offset(normal, position)
}
