use crate::math::{Point, Real, Vector};
use crate::utils;
use ordered_float::OrderedFloat;

/// The two coordinate axes spanning the plane most orthogonal to `normal`.
///
/// These are the axes other than the one of the largest `normal` component, in increasing
/// order. Ties are resolved in favor of the first axis.
#[inline]
pub fn dominant_plane_axes(normal: &Vector<Real>) -> (usize, usize) {
    let mut max_dim = 0;

    for i in 1..3 {
        if normal[i].abs() > normal[max_dim].abs() {
            max_dim = i;
        }
    }

    match max_dim {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Sorts `items`, located at `points`, by increasing polar angle around their centroid.
///
/// Angles are measured in the plane of the two axes given by [`dominant_plane_axes`] of
/// `normal`, so a planar convex set of points ends up in boundary order.
pub fn sort_by_polar_angle<T: Copy>(
    items: &mut [T],
    points: &[Point<Real>],
    normal: &Vector<Real>,
) {
    if items.len() < 3 {
        return;
    }

    let (xd, yd) = dominant_plane_axes(normal);
    let c = utils::center(points);
    let mut keyed: Vec<_> = items
        .iter()
        .zip(points.iter())
        .map(|(item, pt)| {
            let v = pt - c;
            (OrderedFloat(v[yd].atan2(v[xd])), *item)
        })
        .collect();

    keyed.sort_by_key(|(angle, _)| *angle);

    for (dst, (_, item)) in items.iter_mut().zip(keyed) {
        *dst = item;
    }
}
