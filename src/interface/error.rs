use crate::shape::CellType;

/// Errors preventing the reconstruction from running at all.
///
/// Problems local to a single cell (degenerate geometry, null normals, planes missing the
/// cell) are not errors: they are tallied in [`InterfaceStats`](super::InterfaceStats)
/// and the cell is handled gracefully.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum InterfaceError {
    /// No material was described.
    #[error("Invalid materials size: at least one material must be described.")]
    NoMaterials,
    /// A cell references a point that does not exist.
    #[error("the cell {cell} references the point {point} but the mesh only has {num_points} points.")]
    MalformedCell {
        /// The faulty cell.
        cell: usize,
        /// The referenced point.
        point: u32,
        /// The number of points of the mesh.
        num_points: usize,
    },
    /// A cell with a fixed topology has the wrong number of points.
    #[error("the cell {cell} of type {cell_type:?} has {found} points instead of {expected}.")]
    CellSize {
        /// The faulty cell.
        cell: usize,
        /// The type of the faulty cell.
        cell_type: CellType,
        /// The number of points required by the cell type.
        expected: usize,
        /// The number of points of the cell.
        found: usize,
    },
    /// A data array does not have one tuple per point (or per cell).
    #[error("the data array `{name}` has {found} tuples instead of {expected}.")]
    ArrayLength {
        /// The name of the faulty array.
        name: String,
        /// The expected number of tuples.
        expected: usize,
        /// The actual number of tuples.
        found: usize,
    },
    /// The cell offsets do not describe a valid partition of the connectivity buffer.
    #[error("the cell offsets are inconsistent with the connectivity buffer.")]
    InconsistentConnectivity,
}

#[cfg(test)]
mod test {
    use super::InterfaceError;

    #[test]
    fn error_messages() {
        assert!(InterfaceError::NoMaterials
            .to_string()
            .contains("Invalid materials size"));

        let err = InterfaceError::ArrayLength {
            name: "vf".to_string(),
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "the data array `vf` has 3 tuples instead of 4.");
    }
}
