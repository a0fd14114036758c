use crate::math::Real;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// Boolean switches controlling how interfaces are reconstructed.
pub struct InterfaceFlags(u8);

bitflags::bitflags! {
    impl InterfaceFlags: u8 {
        /// Emit the region filled by each material instead of only its interface.
        const FILL_MATERIAL = 1;
        /// Flip the material normals.
        const INVERSE_NORMAL = 1 << 1;
        /// 2D cells describe a volume of revolution around the `x` axis, `y` being the radius.
        const AXIS_SYMMETRIC = 1 << 2;
        /// Only read the normal of the first processed material and reuse it for all the
        /// other materials of the cell, producing parallel interfaces.
        const ONION_PEEL = 1 << 3;
        /// Process materials by decreasing ordering value instead of increasing.
        const REVERSE_MATERIAL_ORDER = 1 << 4;
        /// Interpret the volume fraction of a material as the offset of its interface plane.
        const USE_FRACTION_AS_DISTANCE = 1 << 5;
    }
}

/// Global options of the reconstruction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct InterfaceOptions {
    /// Boolean switches.
    pub flags: InterfaceFlags,
    /// The `[min, max]` acceptance band of volume fractions.
    ///
    /// A material whose fraction is below `min` is ignored in a cell. A material whose
    /// fraction is above `max` fills the whole remaining cell in fill mode, and is ignored
    /// otherwise.
    pub volume_fraction_range: [Real; 2],
}

impl Default for InterfaceOptions {
    fn default() -> Self {
        Self {
            flags: InterfaceFlags::empty(),
            volume_fraction_range: [0.01, 0.99],
        }
    }
}

impl InterfaceOptions {
    /// Default options with the given flags.
    pub fn with_flags(flags: InterfaceFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    /// The lower bound of the acceptance band.
    #[inline]
    pub fn min_fraction(&self) -> Real {
        self.volume_fraction_range[0]
    }

    /// The upper bound of the acceptance band.
    #[inline]
    pub fn max_fraction(&self) -> Real {
        self.volume_fraction_range[1]
    }

    /// Is `flag` set?
    #[inline]
    pub fn has(&self, flag: InterfaceFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Can a material with the given fraction produce any output in a cell of dimension
    /// `dim` with `num_points` points?
    pub fn produces_interface(&self, dim: usize, num_points: usize, fraction: Real) -> bool {
        let supported = (dim == 3 && num_points >= 4) || (dim == 2 && num_points >= 3);

        supported
            && (self.has(InterfaceFlags::USE_FRACTION_AS_DISTANCE)
                || (fraction > self.min_fraction()
                    && (fraction < self.max_fraction() || self.has(InterfaceFlags::FILL_MATERIAL))))
    }
}
