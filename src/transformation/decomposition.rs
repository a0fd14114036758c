use crate::math::{Point, Real};
use crate::shape::{ConvexFaces, Tetrahedron, Triangle};
use crate::utils::hashmap::{self, Entry};
use crate::utils::SortedPair;

/// A decomposition of a convex cell into simplices of local point indices.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Decomposition {
    /// Not computed yet.
    ///
    /// Remaining regions of 3D cells start in this state and are only tetrahedralized when
    /// another material needs to cut them.
    #[default]
    Pending,
    /// A triangulation of a 2D cell.
    Triangles(Vec<[u32; 3]>),
    /// A tetrahedralization of a 3D cell.
    Tetrahedra(Vec<[u32; 4]>),
    /// The cell could not be decomposed.
    Failed,
}

impl Decomposition {
    /// Is this a usable decomposition?
    pub fn is_valid(&self) -> bool {
        matches!(self, Decomposition::Triangles(_) | Decomposition::Tetrahedra(_))
    }

    /// The area (2D) or volume (3D) covered by the simplices of this decomposition.
    ///
    /// Returns zero for pending and failed decompositions.
    pub fn measure(&self, points: &[Point<Real>]) -> Real {
        match self {
            Decomposition::Triangles(tris) => tris
                .iter()
                .map(|t| {
                    Triangle::new(
                        points[t[0] as usize],
                        points[t[1] as usize],
                        points[t[2] as usize],
                    )
                    .area()
                })
                .sum(),
            Decomposition::Tetrahedra(tets) => tets
                .iter()
                .map(|t| Tetrahedron::from_indices(points, t).volume())
                .sum(),
            Decomposition::Pending | Decomposition::Failed => 0.0,
        }
    }
}

/// Pushes the fan triangulation of a convex polygon with `n` points in boundary order.
///
/// Every triangle shares the point 0. Pushes `n - 2` triangles to `out`.
#[inline]
pub fn push_fan_triangles(n: u32, out: &mut Vec<[u32; 3]>) {
    for i in 1..n.saturating_sub(1) {
        out.push([0, i, i + 1]);
    }
}

/// Pushes the fan tetrahedralization of a convex polyhedron seen from its point `apex`.
///
/// Each face not containing `apex` is fan-triangulated and every triangle is joined to
/// `apex`. The result covers the polyhedron as long as `apex` lies on its boundary or inside.
pub fn push_fan_tetrahedra(faces: &ConvexFaces, apex: u32, out: &mut Vec<[u32; 4]>) {
    for face in faces.iter() {
        if face.len() < 3 || face.contains(&apex) {
            continue;
        }

        for i in 1..face.len() - 1 {
            out.push([apex, face[0], face[i], face[i + 1]]);
        }
    }
}

/// Pushes the edges of the given faces to `out`, each undirected edge only once.
///
/// Edges are listed in the order they are first encountered while walking the faces.
pub fn push_face_edges(faces: &ConvexFaces, out: &mut Vec<[u32; 2]>) {
    let mut seen = hashmap::with_capacity(faces.len() * 4);

    for face in faces.iter() {
        for (k, a) in face.iter().enumerate() {
            let b = face[(k + 1) % face.len()];
            let key = SortedPair::new(*a, b);

            if let Entry::Vacant(e) = seen.entry(key) {
                let _ = e.insert(());
                out.push(*key);
            }
        }
    }
}
