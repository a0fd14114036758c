use std::ops::AddAssign;

/// Counters of the recoverable conditions met during a reconstruction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct InterfaceStats {
    /// Mesh cells that were processed.
    pub processed_cells: usize,
    /// Cells emitted, all materials included.
    pub emitted_cells: usize,
    /// Mesh cells that could not be decomposed into simplices.
    pub primary_triangulation_failed: usize,
    /// Remaining regions, left after a cut, that could not be decomposed into simplices.
    pub triangulation_failed: usize,
    /// Materials with a zero-length normal.
    pub null_normal: usize,
    /// Cuts rejected because the plane did not cross the cell properly.
    pub no_interface_found: usize,
}

impl AddAssign for InterfaceStats {
    fn add_assign(&mut self, rhs: Self) {
        self.processed_cells += rhs.processed_cells;
        self.emitted_cells += rhs.emitted_cells;
        self.primary_triangulation_failed += rhs.primary_triangulation_failed;
        self.triangulation_failed += rhs.triangulation_failed;
        self.null_normal += rhs.null_normal;
        self.no_interface_found += rhs.no_interface_found;
    }
}
