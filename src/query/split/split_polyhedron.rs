use super::{InterfacePoint, PolyhedronSplit};
use crate::math::{Point, Real, Vector};
use crate::utils;
use smallvec::SmallVec;

/// Splits a convex polyhedron by the plane `dot(p, normal) + offset = 0`.
///
/// `edges` are the polyhedron edges as pairs of local point indices and `num_faces` its
/// number of faces. Vertices with `dot(p, normal) + offset <= 0` are inside. Every edge with
/// endpoints on strictly opposite sides of the plane yields an interface point. When more
/// than three, the interface points are sorted by polar angle around their centroid so they
/// form the boundary of the interface polygon.
///
/// Returns `None` if the plane crosses fewer than 3 edges, or more edges than the polyhedron
/// has faces, which only happens for inconsistent topologies.
pub fn split_polyhedron(
    points: &[Point<Real>],
    edges: &[[u32; 2]],
    num_faces: usize,
    normal: &Vector<Real>,
    offset: Real,
) -> Option<PolyhedronSplit> {
    let dist: Vec<Real> = points
        .iter()
        .map(|p| normal.dot(&p.coords) + offset)
        .collect();

    let mut interface: SmallVec<[InterfacePoint; 8]> = edges
        .iter()
        .filter_map(|[a, b]| {
            InterfacePoint::on_edge(points, *a, *b, dist[*a as usize], dist[*b as usize])
        })
        .collect();

    if interface.len() < 3 || interface.len() > num_faces {
        log::debug!(
            "Polyhedron split found {} crossing(s) for {} face(s).",
            interface.len(),
            num_faces
        );
        return None;
    }

    if interface.len() > 3 {
        let locations: SmallVec<[Point<Real>; 8]> = interface.iter().map(|ip| ip.point).collect();
        utils::sort_by_polar_angle(&mut interface, &locations, normal);
    }

    let (inside, outside): (Vec<u32>, Vec<u32>) =
        (0..points.len() as u32).partition(|i| dist[*i as usize] <= 0.0);

    Some(PolyhedronSplit {
        interface,
        inside,
        outside,
    })
}
