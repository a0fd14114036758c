use super::{InterfacePoint, PolygonSplit, PolygonVertex};
use crate::math::{Point, Real, Vector};
use arrayvec::ArrayVec;

/// Splits a convex polygon by the line `dot(p, normal) + offset = 0`.
///
/// `points` are the polygon vertices in boundary order. Vertices with
/// `dot(p, normal) + offset <= 0` are inside. The boundary is walked once: every vertex is
/// appended to the polygon of its side and each of the first two edges with endpoints on
/// strictly opposite sides inserts its crossing into both polygons, right after the edge's
/// first vertex. Both resulting polygons are thus correctly wound.
///
/// Returns `None` if the line does not cross the polygon boundary exactly twice, e.g., if it
/// misses the polygon or only touches one of its vertices.
pub fn split_polygon(
    points: &[Point<Real>],
    normal: &Vector<Real>,
    offset: Real,
) -> Option<PolygonSplit> {
    let n = points.len();
    let dist: Vec<Real> = points
        .iter()
        .map(|p| normal.dot(&p.coords) + offset)
        .collect();

    let mut interface = ArrayVec::new();
    let mut inside = Vec::with_capacity(n + 2);
    let mut outside = Vec::with_capacity(n + 2);

    for i in 0..n {
        if dist[i] <= 0.0 {
            inside.push(PolygonVertex::Vertex(i as u32));
        } else {
            outside.push(PolygonVertex::Vertex(i as u32));
        }

        if interface.len() < 2 {
            let j = (i + 1) % n;

            if let Some(ip) =
                InterfacePoint::on_edge(points, i as u32, j as u32, dist[i], dist[j])
            {
                let id = PolygonVertex::Interface(interface.len() as u32);
                interface.push(ip);
                inside.push(id);
                outside.push(id);
            }
        }
    }

    if interface.len() == 2 {
        Some(PolygonSplit {
            interface,
            inside,
            outside,
        })
    } else {
        log::debug!(
            "Polygon split found {} crossing(s) instead of 2.",
            interface.len()
        );
        None
    }
}
