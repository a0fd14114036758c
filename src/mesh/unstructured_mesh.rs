use super::DataArray;
use crate::interface::InterfaceError;
use crate::math::{Point, Real};
use crate::shape::CellType;

/// An unstructured mesh made of typed cells, stored in flat arrays.
///
/// The points of the `i`-th cell are `connectivity[offsets[i]..offsets[i + 1]]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct UnstructuredMesh {
    /// The point coordinates.
    pub points: Vec<Point<Real>>,
    /// The type of each cell.
    pub cell_types: Vec<CellType>,
    /// The start of each cell in `connectivity`, followed by the length of `connectivity`.
    pub offsets: Vec<usize>,
    /// The point indices of all the cells.
    pub connectivity: Vec<u32>,
    /// Arrays with one tuple per point.
    pub point_data: Vec<DataArray>,
    /// Arrays with one tuple per cell.
    pub cell_data: Vec<DataArray>,
}

impl Default for UnstructuredMesh {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            cell_types: Vec::new(),
            offsets: vec![0],
            connectivity: Vec::new(),
            point_data: Vec::new(),
            cell_data: Vec::new(),
        }
    }
}

impl UnstructuredMesh {
    /// Creates a mesh without cells from the given points.
    pub fn new(points: Vec<Point<Real>>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Creates an empty mesh with the same point and cell arrays (names and number of
    /// components) as `self`.
    pub fn empty_like(&self) -> Self {
        Self {
            point_data: self.point_data.iter().map(DataArray::empty_like).collect(),
            cell_data: self.cell_data.iter().map(DataArray::empty_like).collect(),
            ..Self::default()
        }
    }

    /// Appends a cell.
    pub fn push_cell(&mut self, cell_type: CellType, points: &[u32]) {
        self.cell_types.push(cell_type);
        self.connectivity.extend_from_slice(points);
        self.offsets.push(self.connectivity.len());
    }

    /// The number of points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The number of cells.
    pub fn num_cells(&self) -> usize {
        self.cell_types.len()
    }

    /// Does this mesh have no cell?
    pub fn is_empty(&self) -> bool {
        self.cell_types.is_empty()
    }

    /// The type of the `i`-th cell.
    pub fn cell_type(&self, i: usize) -> CellType {
        self.cell_types[i]
    }

    /// The point indices of the `i`-th cell.
    pub fn cell_points(&self, i: usize) -> &[u32] {
        &self.connectivity[self.offsets[i]..self.offsets[i + 1]]
    }

    /// The point array with the given name.
    pub fn point_data_array(&self, name: &str) -> Option<&DataArray> {
        self.point_data.iter().find(|a| a.name == name)
    }

    /// The cell array with the given name.
    pub fn cell_data_array(&self, name: &str) -> Option<&DataArray> {
        self.cell_data.iter().find(|a| a.name == name)
    }

    /// Checks that the cells and data arrays of this mesh are consistent.
    pub fn validate(&self) -> Result<(), InterfaceError> {
        if self.offsets.len() != self.cell_types.len() + 1
            || self.offsets.first() != Some(&0)
            || self.offsets.last() != Some(&self.connectivity.len())
            || self.offsets.windows(2).any(|w| w[0] > w[1])
        {
            return Err(InterfaceError::InconsistentConnectivity);
        }

        let num_points = self.num_points();

        for cell in 0..self.num_cells() {
            let pts = self.cell_points(cell);

            if let Some(&point) = pts.iter().find(|p| **p as usize >= num_points) {
                return Err(InterfaceError::MalformedCell {
                    cell,
                    point,
                    num_points,
                });
            }

            let cell_type = self.cell_types[cell];
            if let Some(expected) = cell_type.num_points() {
                if expected != pts.len() {
                    return Err(InterfaceError::CellSize {
                        cell,
                        cell_type,
                        expected,
                        found: pts.len(),
                    });
                }
            }
        }

        check_arrays(&self.point_data, num_points)?;
        check_arrays(&self.cell_data, self.num_cells())
    }
}

fn check_arrays(arrays: &[DataArray], expected: usize) -> Result<(), InterfaceError> {
    for array in arrays {
        if array.num_components == 0
            || array.values.len() % array.num_components != 0
            || array.len() != expected
        {
            return Err(InterfaceError::ArrayLength {
                name: array.name.clone(),
                expected,
                found: array.len(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn two_triangles() -> UnstructuredMesh {
        let mut mesh = UnstructuredMesh::new(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ]);
        mesh.push_cell(CellType::Triangle, &[0, 1, 2]);
        mesh.push_cell(CellType::Triangle, &[0, 2, 3]);
        mesh
    }

    #[test]
    fn cell_access() {
        let mesh = two_triangles();
        assert_eq!(mesh.num_cells(), 2);
        assert_eq!(mesh.cell_points(1), &[0, 2, 3]);
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn validation_errors() {
        let mut mesh = two_triangles();
        mesh.connectivity[4] = 9;
        assert_eq!(
            mesh.validate(),
            Err(InterfaceError::MalformedCell {
                cell: 1,
                point: 9,
                num_points: 4
            })
        );

        let mut mesh = two_triangles();
        mesh.cell_data.push(DataArray::scalars("vf", vec![0.5]));
        assert!(matches!(
            mesh.validate(),
            Err(InterfaceError::ArrayLength { expected: 2, found: 1, .. })
        ));

        let mut mesh = two_triangles();
        mesh.push_cell(CellType::Quad, &[0, 1, 2]);
        assert!(matches!(mesh.validate(), Err(InterfaceError::CellSize { .. })));

        let mut mesh = two_triangles();
        let _ = mesh.offsets.pop();
        assert_eq!(mesh.validate(), Err(InterfaceError::InconsistentConnectivity));
    }
}
