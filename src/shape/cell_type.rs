//! The closed set of cell kinds understood by the reconstruction.

/// Enum representing the type of a mesh cell.
///
/// Point ordering follows the usual unstructured-grid conventions: quads and polygons are
/// listed in boundary order, hexahedra list their bottom quad then their top quad, wedges
/// list their bottom triangle then their top triangle, and pyramids list their base quad
/// then their apex.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CellType {
    /// A segment. Only produced as the interface of a 2D cell.
    Line,
    /// A triangle.
    Triangle,
    /// A quadrilateral.
    Quad,
    /// A convex polygon with any number of points.
    Polygon,
    /// A tetrahedron.
    Tetra,
    /// A hexahedron.
    Hexahedron,
    /// A triangular prism.
    Wedge,
    /// A pyramid with a quadrilateral base.
    Pyramid,
    /// The convex hull of an unordered set of points.
    ConvexPointSet,
}

const TETRA_FACES: &[&[u32]] = &[&[0, 1, 3], &[1, 2, 3], &[2, 0, 3], &[0, 2, 1]];
const HEXAHEDRON_FACES: &[&[u32]] = &[
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[3, 7, 6, 2],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];
const WEDGE_FACES: &[&[u32]] = &[
    &[0, 1, 2],
    &[3, 5, 4],
    &[0, 3, 4, 1],
    &[1, 4, 5, 2],
    &[2, 5, 3, 0],
];
const PYRAMID_FACES: &[&[u32]] = &[&[0, 3, 2, 1], &[0, 1, 4], &[1, 2, 4], &[2, 3, 4], &[3, 0, 4]];

impl CellType {
    /// The topological dimension of this cell kind.
    pub fn dimension(self) -> usize {
        match self {
            CellType::Line => 1,
            CellType::Triangle | CellType::Quad | CellType::Polygon => 2,
            CellType::Tetra
            | CellType::Hexahedron
            | CellType::Wedge
            | CellType::Pyramid
            | CellType::ConvexPointSet => 3,
        }
    }

    /// The number of points of this cell kind, if fixed.
    pub fn num_points(self) -> Option<usize> {
        match self {
            CellType::Line => Some(2),
            CellType::Triangle => Some(3),
            CellType::Quad | CellType::Tetra => Some(4),
            CellType::Pyramid => Some(5),
            CellType::Wedge => Some(6),
            CellType::Hexahedron => Some(8),
            CellType::Polygon | CellType::ConvexPointSet => None,
        }
    }

    /// The faces of a 3D cell kind with a fixed topology, as loops of local point indices.
    ///
    /// Returns `None` for 1D and 2D cells, and for [`CellType::ConvexPointSet`] whose faces
    /// depend on the point positions.
    pub fn faces(self) -> Option<&'static [&'static [u32]]> {
        match self {
            CellType::Tetra => Some(TETRA_FACES),
            CellType::Hexahedron => Some(HEXAHEDRON_FACES),
            CellType::Wedge => Some(WEDGE_FACES),
            CellType::Pyramid => Some(PYRAMID_FACES),
            _ => None,
        }
    }

    /// The identifier of this cell kind in the VTK file formats.
    pub fn vtk_id(self) -> u8 {
        match self {
            CellType::Line => 3,
            CellType::Triangle => 5,
            CellType::Polygon => 7,
            CellType::Quad => 9,
            CellType::Tetra => 10,
            CellType::Hexahedron => 12,
            CellType::Wedge => 13,
            CellType::Pyramid => 14,
            CellType::ConvexPointSet => 41,
        }
    }

    /// The cell kind with the given VTK identifier, if supported.
    pub fn from_vtk_id(id: u8) -> Option<Self> {
        let ty = match id {
            3 => CellType::Line,
            5 => CellType::Triangle,
            7 => CellType::Polygon,
            9 => CellType::Quad,
            10 => CellType::Tetra,
            12 => CellType::Hexahedron,
            13 => CellType::Wedge,
            14 => CellType::Pyramid,
            41 => CellType::ConvexPointSet,
            _ => return None,
        };
        Some(ty)
    }
}
