use crate::math::{Point, Real};
use arrayvec::ArrayVec;
use smallvec::SmallVec;

/// A point where a cutting plane crosses an edge of a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InterfacePoint {
    /// The local indices of the edge endpoints.
    pub edge: [u32; 2],
    /// The barycentric coordinate of the crossing along the edge: the point is
    /// `edge[0] + weight * (edge[1] - edge[0])`.
    pub weight: Real,
    /// The location of the crossing.
    pub point: Point<Real>,
}

impl InterfacePoint {
    /// The crossing of the plane with the edge `[a, b]`, given the signed distances of its
    /// endpoints to the plane.
    ///
    /// Returns `None` unless the endpoints lie strictly on opposite sides of the plane.
    #[inline]
    pub fn on_edge(points: &[Point<Real>], a: u32, b: u32, da: Real, db: Real) -> Option<Self> {
        if da * db >= 0.0 {
            return None;
        }

        let denom = db - da;
        let weight = if denom != 0.0 {
            (-da / denom).max(0.0).min(1.0)
        } else {
            0.0
        };
        let pa = points[a as usize];
        let pb = points[b as usize];

        Some(Self {
            edge: [a, b],
            weight,
            point: pa + (pb - pa) * weight,
        })
    }
}

/// A vertex of a polygon resulting from a split.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PolygonVertex {
    /// A vertex of the original polygon, identified by its local index.
    Vertex(u32),
    /// An interface point, identified by its index in [`PolygonSplit::interface`].
    Interface(u32),
}

/// The result of splitting a convex polygon by a line.
#[derive(Clone, Debug)]
pub struct PolygonSplit {
    /// The two crossings of the line with the polygon boundary.
    pub interface: ArrayVec<InterfacePoint, 2>,
    /// The polygon on the negative side of the line, in boundary order.
    pub inside: Vec<PolygonVertex>,
    /// The polygon on the positive side of the line, in boundary order.
    pub outside: Vec<PolygonVertex>,
}

/// The result of splitting a convex polyhedron by a plane.
#[derive(Clone, Debug)]
pub struct PolyhedronSplit {
    /// The crossings of the plane with the polyhedron edges, ordered along the boundary of
    /// the interface polygon.
    pub interface: SmallVec<[InterfacePoint; 8]>,
    /// The local indices of the vertices on the negative side of the plane.
    pub inside: Vec<u32>,
    /// The local indices of the vertices on the positive side of the plane.
    pub outside: Vec<u32>,
}

impl PolyhedronSplit {
    /// The locations of the interface points.
    pub fn interface_points(&self) -> impl Iterator<Item = Point<Real>> + '_ {
        self.interface.iter().map(|ip| ip.point)
    }
}
