use super::{sweep_levels, SweepFrame};
use crate::math::{Point, Real, Vector};
use crate::query::PiecewisePolynomial;
use crate::shape::Triangle;
use crate::utils::{lerp_by_level, Quadratic};

/// Computes the offset of the plane orthogonal to `normal` that cuts off `fraction` of the
/// volume of a convex polyhedron decomposed into `tetrahedra`.
///
/// The polyhedron points with `dot(p, normal) + offset <= 0` carry the requested fraction
/// of the volume.
///
/// # Example
///
/// ```
/// use youngs::math::{Point, Vector};
/// use youngs::query::cutting_plane_tetrahedra;
///
/// let tetra = [
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(0.0, 1.0, 0.0),
///     Point::new(0.0, 0.0, 1.0),
/// ];
///
/// // The part x >= s of this tetrahedron has a volume of (1 - s)³ / 6.
/// let offset = cutting_plane_tetrahedra(&-Vector::x(), 0.125, &tetra, &[[0, 1, 2, 3]]);
/// assert!((offset - 0.5).abs() < 1.0e-9);
/// ```
pub fn cutting_plane_tetrahedra(
    normal: &Vector<Real>,
    fraction: Real,
    vertices: &[Point<Real>],
    tetrahedra: &[[u32; 4]],
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
    let mut areas = PiecewisePolynomial::<3>::new(levels.levels.clone());

    for tet in tetrahedra {
        let [i0, i1, i2, i3] = levels.sort_simplex(tet);
        let [p0, p1, p2, p3] = [i0, i1, i2, i3].map(|i| local[i as usize]);
        let [d0, d1, d2, d3] = [i0, i1, i2, i3].map(|i| heights[i as usize]);

        // Section at the level of the second vertex: a triangle.
        let area1 = Triangle::new(
            p1,
            lerp_by_level(d0, &p0, d2, &p2, d1),
            lerp_by_level(d0, &p0, d3, &p3, d1),
        )
        .area();

        // Section halfway between the second and third vertices: a quadrilateral.
        let d12 = (d1 + d2) * 0.5;
        let a = lerp_by_level(d0, &p0, d2, &p2, d12);
        let b = lerp_by_level(d0, &p0, d3, &p3, d12);
        let c = lerp_by_level(d1, &p1, d3, &p3, d12);
        let d = lerp_by_level(d1, &p1, d2, &p2, d12);
        let area12 = Triangle::new(a, b, d).area() + Triangle::new(b, c, d).area();

        // Section at the level of the third vertex: a triangle.
        let area2 = Triangle::new(
            p2,
            lerp_by_level(d0, &p0, d3, &p3, d2),
            lerp_by_level(d1, &p1, d3, &p3, d2),
        )
        .area();

        if d1 > d0 {
            let coeff = area1 / ((d1 - d0) * (d1 - d0));
            areas.add_on(
                levels.intervals(i0, i1),
                Quadratic::scaled_square(d0, coeff),
            );
        }

        areas.add_on(
            levels.intervals(i1, i2),
            Quadratic::interpolate(d1, area1, d12, area12, d2, area2),
        );

        if d3 > d2 {
            let coeff = area2 / ((d3 - d2) * (d3 - d2));
            areas.add_on(
                levels.intervals(i2, i3),
                Quadratic::scaled_square(d3, coeff),
            );
        }
    }

    let position = areas.solve::<4>(fraction);
    frame.to_offset(normal, position)
}
