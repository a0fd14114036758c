//! Material interface reconstruction.
//!
//! [`CellCutter`] carves the materials of a single cell one after another, and
//! [`MaterialInterface`] drives it over every cell of multi-block meshes.

pub use self::cell_cutter::{
    CellCutter, CellReconstruction, EmittedPoint, MaterialCellOutput, MaterialOutcome,
};
pub use self::cell_info::{CellInfo, CellScratch};
pub use self::error::InterfaceError;
pub use self::material::{MaterialDescription, MaterialSample, NormalArrays};
pub use self::material_interface::{
    BlockReconstruction, MaterialInterface, MaterialInterfaceOutput,
};
pub use self::options::{InterfaceFlags, InterfaceOptions};
pub use self::point_ref::PointRef;
pub use self::stats::InterfaceStats;

mod cell_cutter;
mod cell_info;
mod error;
mod material;
mod material_interface;
mod options;
mod point_ref;
mod stats;
