use super::PointRef;
use crate::math::{Point, Real, MAX_CELL_POINTS};
use crate::shape::{convex_point_set_faces, CellType, ConvexFaces};
use crate::transformation::{
    push_face_edges, push_fan_tetrahedra, push_fan_triangles, Decomposition,
};

/// Buffers reused from one cell to the next while decomposing cells.
#[derive(Clone, Debug, Default)]
pub struct CellScratch {
    faces: ConvexFaces,
    face_loop: Vec<u32>,
}

impl CellScratch {
    /// Creates empty buffers.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A snapshot of the cell being cut: the original mesh cell at first, then whatever region
/// remains after each material was carved out of it.
#[derive(Clone, Debug, PartialEq)]
pub struct CellInfo {
    cell_type: CellType,
    points: Vec<Point<Real>>,
    point_refs: Vec<PointRef>,
    edges: Vec<[u32; 2]>,
    num_faces: usize,
    decomposition: Decomposition,
}

impl Default for CellInfo {
    fn default() -> Self {
        Self::empty()
    }
}

impl CellInfo {
    /// A cell without any point.
    pub fn empty() -> Self {
        Self {
            cell_type: CellType::ConvexPointSet,
            points: Vec::new(),
            point_refs: Vec::new(),
            edges: Vec::new(),
            num_faces: 0,
            decomposition: Decomposition::Failed,
        }
    }

    /// Snapshots a cell of the input mesh and decomposes it right away.
    ///
    /// A cell that cannot be decomposed (too few or too many points, inconsistent point
    /// count, flat convex point set) gets a [`Decomposition::Failed`].
    pub fn from_mesh_cell(
        cell_type: CellType,
        point_ids: &[u32],
        mesh_points: &[Point<Real>],
        scratch: &mut CellScratch,
    ) -> Self {
        let mut result = Self {
            cell_type,
            points: point_ids
                .iter()
                .map(|id| mesh_points[*id as usize])
                .collect(),
            point_refs: point_ids.iter().map(|id| PointRef::MeshPoint(*id)).collect(),
            edges: Vec::new(),
            num_faces: 0,
            decomposition: Decomposition::Pending,
        };

        result.decompose(scratch);
        result
    }

    /// A convex polygon with points in boundary order, triangulated right away.
    pub fn polygon(points: Vec<Point<Real>>, point_refs: Vec<PointRef>) -> Self {
        let mut result = Self {
            cell_type: CellType::Polygon,
            points,
            point_refs,
            edges: Vec::new(),
            num_faces: 0,
            decomposition: Decomposition::Pending,
        };

        result.decompose(&mut CellScratch::new());
        result
    }

    /// The convex hull of a set of points.
    ///
    /// Its faces, edges and tetrahedra are only computed by
    /// [`CellInfo::ensure_decomposition`].
    pub fn convex_point_set(points: Vec<Point<Real>>, point_refs: Vec<PointRef>) -> Self {
        Self {
            cell_type: CellType::ConvexPointSet,
            points,
            point_refs,
            edges: Vec::new(),
            num_faces: 0,
            decomposition: Decomposition::Pending,
        }
    }

    /// The type of this cell.
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// The dimension of this cell.
    pub fn dimension(&self) -> usize {
        self.cell_type.dimension()
    }

    /// The number of points of this cell.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Does this cell have no point?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point coordinates.
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// Where each point comes from.
    pub fn point_refs(&self) -> &[PointRef] {
        &self.point_refs
    }

    /// The edges of a 3D cell, as pairs of local point indices.
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    /// The number of faces of a 3D cell.
    pub fn num_faces(&self) -> usize {
        self.num_faces
    }

    /// The simplex decomposition of this cell.
    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    /// Decomposes this cell if it was not done yet. Returns `true` if the decomposition is
    /// usable.
    pub fn ensure_decomposition(&mut self, scratch: &mut CellScratch) -> bool {
        if self.decomposition == Decomposition::Pending {
            self.decompose(scratch);
        }

        self.decomposition.is_valid()
    }

    /// The area (2D) or volume (3D) of this cell, computed from its decomposition.
    pub fn measure(&mut self, scratch: &mut CellScratch) -> Real {
        let _ = self.ensure_decomposition(scratch);
        self.decomposition.measure(&self.points)
    }

    fn decompose(&mut self, scratch: &mut CellScratch) {
        self.edges.clear();
        self.num_faces = 0;
        self.decomposition = Decomposition::Failed;

        let n = self.points.len();
        if n > MAX_CELL_POINTS {
            return;
        }

        if let Some(expected) = self.cell_type.num_points() {
            if expected != n {
                return;
            }
        }

        match self.cell_type.dimension() {
            2 if n >= 3 => {
                let mut triangles = Vec::with_capacity(n - 2);
                push_fan_triangles(n as u32, &mut triangles);
                self.decomposition = Decomposition::Triangles(triangles);
            }
            3 if n >= 4 => {
                match self.cell_type.faces() {
                    Some(table) => scratch.faces = ConvexFaces::from_table(table),
                    None => {
                        if !convex_point_set_faces(
                            &self.points,
                            &mut scratch.faces,
                            &mut scratch.face_loop,
                        ) {
                            return;
                        }
                    }
                }

                let mut tetrahedra = Vec::new();
                push_fan_tetrahedra(&scratch.faces, 0, &mut tetrahedra);
                push_face_edges(&scratch.faces, &mut self.edges);
                self.num_faces = scratch.faces.len();
                self.decomposition = Decomposition::Tetrahedra(tetrahedra);
            }
            _ => {}
        }
    }
}
