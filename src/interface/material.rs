use crate::math::{Real, Vector};
use crate::mesh::{DataArray, UnstructuredMesh};

/// The data of one material in one cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialSample {
    /// The volume fraction of the material in the cell, or the offset of its interface
    /// plane with [`InterfaceFlags::USE_FRACTION_AS_DISTANCE`](super::InterfaceFlags).
    pub fraction: Real,
    /// The interface normal, pointing away from the material. Need not be normalized.
    pub normal: Vector<Real>,
    /// The key deciding in which order materials are processed.
    pub ordering: Real,
}

impl MaterialSample {
    /// A sample with the given fraction and normal, and a zero ordering key.
    pub fn new(fraction: Real, normal: Vector<Real>) -> Self {
        Self {
            fraction,
            normal,
            ordering: 0.0,
        }
    }

    /// Sets the ordering key.
    pub fn with_ordering(mut self, ordering: Real) -> Self {
        self.ordering = ordering;
        self
    }
}

/// The cell arrays holding the normals of a material.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum NormalArrays {
    /// No normal array: the normal is null.
    #[default]
    None,
    /// One array with (up to) three components.
    Vector(String),
    /// One scalar array per axis.
    Components([String; 3]),
}

impl NormalArrays {
    /// Parses array names.
    ///
    /// A single name refers to a vector array. Three names separated by whitespace refer to
    /// per-axis scalar arrays. Anything else means no array.
    pub fn parse(names: &str) -> Self {
        let parts: Vec<&str> = names.split_whitespace().collect();

        match parts.as_slice() {
            [] => NormalArrays::None,
            [name] => NormalArrays::Vector(name.to_string()),
            [x, y, z] => NormalArrays::Components([x.to_string(), y.to_string(), z.to_string()]),
            _ => {
                log::warn!(
                    "Expected one or three normal array names, found {}: `{}`.",
                    parts.len(),
                    names
                );
                NormalArrays::None
            }
        }
    }

    /// Is there no normal array?
    pub fn is_none(&self) -> bool {
        matches!(self, NormalArrays::None)
    }
}

/// Describes the cell arrays of one material.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MaterialDescription {
    /// The name of the volume fraction array.
    pub volume: String,
    /// The normal arrays.
    pub normal: NormalArrays,
    /// The name of the ordering array.
    pub ordering: Option<String>,
    /// The blocks this material is reconstructed in, when not using all blocks.
    pub blocks: Vec<usize>,
}

impl MaterialDescription {
    /// A material with the given volume fraction array and no normal nor ordering array.
    pub fn new(volume: impl Into<String>) -> Self {
        Self {
            volume: volume.into(),
            ..Self::default()
        }
    }

    /// Sets the normal arrays, see [`NormalArrays::parse`].
    pub fn with_normal(mut self, names: &str) -> Self {
        self.normal = NormalArrays::parse(names);
        self
    }

    /// Sets the ordering array.
    pub fn with_ordering(mut self, name: impl Into<String>) -> Self {
        self.ordering = Some(name.into());
        self
    }

    /// Sets the blocks this material is reconstructed in.
    pub fn with_blocks(mut self, blocks: Vec<usize>) -> Self {
        self.blocks = blocks;
        self
    }
}

/// The normal arrays of a material, looked up in a mesh.
#[derive(Copy, Clone, Debug)]
pub(crate) enum NormalSource<'a> {
    None,
    Vector(&'a DataArray),
    Components([Option<&'a DataArray>; 3]),
}

impl<'a> NormalSource<'a> {
    pub fn lookup(normal: &NormalArrays, mesh: &'a UnstructuredMesh) -> Self {
        match normal {
            NormalArrays::None => NormalSource::None,
            NormalArrays::Vector(name) => mesh
                .cell_data_array(name)
                .map_or(NormalSource::None, NormalSource::Vector),
            NormalArrays::Components(names) => {
                NormalSource::Components(names.each_ref().map(|n| mesh.cell_data_array(n)))
            }
        }
    }

    pub fn normal(&self, cell: usize) -> Vector<Real> {
        match self {
            NormalSource::None => Vector::zeros(),
            NormalSource::Vector(array) => Vector::new(
                array.component(cell, 0),
                array.component(cell, 1),
                array.component(cell, 2),
            ),
            NormalSource::Components(arrays) => {
                Vector::from((*arrays).map(|a| a.map_or(0.0, |a| a.component(cell, 0))))
            }
        }
    }
}

/// The arrays of a material, looked up in a mesh. Missing arrays read as zero.
#[derive(Copy, Clone, Debug)]
pub(crate) struct MaterialArrays<'a> {
    pub fraction: Option<&'a DataArray>,
    pub normal: NormalSource<'a>,
    pub ordering: Option<&'a DataArray>,
}

impl MaterialArrays<'_> {
    pub fn sample(&self, cell: usize) -> MaterialSample {
        MaterialSample {
            fraction: self.fraction.map_or(0.0, |a| a.component(cell, 0)),
            normal: self.normal.normal(cell),
            ordering: self.ordering.map_or(0.0, |a| a.component(cell, 0)),
        }
    }
}
