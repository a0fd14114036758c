use super::{sweep_levels, SweepFrame};
use crate::math::{Point, Real, Vector};
use crate::query::PiecewisePolynomial;
use crate::utils::{lerp_by_level, Quadratic};
use std::f64::consts::PI;

/// Computes the offset of the plane orthogonal to `normal` that cuts off `fraction` of the
/// volume of revolution of a polygon, for axisymmetric meshes.
///
/// The polygon lies in the `(x, y)` plane, `x` being the symmetry axis and `y` the radius.
/// Only the `x` and `y` components of the points and of `normal` are used. The sweep of
/// each triangle is approximated by the lateral surfaces of the cones generated by its
/// widest section.
pub fn cutting_cone_triangles(
    normal: &Vector<Real>,
    fraction: Real,
    vertices: &[Point<Real>],
    triangles: &[[u32; 3]],
) -> Real {
    let Some(first) = vertices.first() else {
        return 0.0;
    };

    let normal = Vector::new(normal.x, normal.y, 0.0);
    let flat: Vec<_> = vertices.iter().map(|p| Point::new(p.x, p.y, 0.0)).collect();

    // The radius must not be translated: cone surfaces depend on its absolute value.
    let frame = SweepFrame::new(Point::new(first.x, 0.0, 0.0), &flat);
    if frame.is_degenerate() {
        return frame.to_offset(&normal, 0.0);
    }

    let local: Vec<_> = flat.iter().map(|p| frame.to_local(p)).collect();
    let (heights, levels) = sweep_levels(&normal, &local);
    let mut surfaces = PiecewisePolynomial::<3>::new(levels.levels.clone());

    for tri in triangles {
        let [i0, i1, i2] = levels.sort_simplex(tri);
        let (p0, p1, p2) = (local[i0 as usize], local[i1 as usize], local[i2 as usize]);
        let (d0, d1, d2) = (
            heights[i0 as usize],
            heights[i1 as usize],
            heights[i2 as usize],
        );

        let mid = lerp_by_level(d0, &p0, d2, &p2, d1);
        let length = (p1 - mid).norm();
        let surface = PI * (mid.y + p1.y).abs() * length;

        if d1 > d0 {
            let coeff = surface / ((d1 - d0) * (d1 - d0));
            surfaces.add_on(
                levels.intervals(i0, i1),
                Quadratic::scaled_square(d0, coeff),
            );
        }

        if d2 > d1 {
            let coeff = surface / ((d2 - d1) * (d2 - d1));
            surfaces.add_on(
                levels.intervals(i1, i2),
                Quadratic::scaled_square(d2, coeff),
            );
        }
    }

    let position = surfaces.solve::<4>(fraction);
    frame.to_offset(&normal, position)
}
