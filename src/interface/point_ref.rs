/// Identifies a point of a cell being cut.
///
/// The points of a cell are either points of the input mesh or interface points created
/// while cutting the cell for a previous material.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum PointRef {
    /// The point with the given index in the input mesh.
    MeshPoint(u32),
    /// The `index`-th new point emitted for `material` in the current mesh cell.
    InterpolatedPoint {
        /// The material whose cut created the point.
        material: u32,
        /// The index of the point among the new points of that material.
        index: u32,
    },
}
