//! Cut-filter steepness.

use core::fmt;

/// Number of biquad slots in each cut bank.
pub const MAX_SECTIONS: usize = 4;

/// Steepness of a cut filter in dB per octave.
///
/// Each 12 dB/oct step adds one cascaded second-order section, so the slope
/// maps directly to the number of enabled slots in a cut bank.
///
/// ```rust
/// use simpleq_core::SlopeOrder;
///
/// assert_eq!(SlopeOrder::Db12.section_count(), 1);
/// assert_eq!(SlopeOrder::Db48.section_count(), 4);
/// assert_eq!(SlopeOrder::from_index(2), Some(SlopeOrder::Db36));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum SlopeOrder {
    /// 12 dB/oct, one section.
    #[default]
    Db12,
    /// 24 dB/oct, two sections.
    Db24,
    /// 36 dB/oct, three sections.
    Db36,
    /// 48 dB/oct, four sections.
    Db48,
}

impl SlopeOrder {
    /// All slopes in ascending steepness.
    pub const ALL: [Self; MAX_SECTIONS] = [Self::Db12, Self::Db24, Self::Db36, Self::Db48];

    /// Choice index as stored in the parameter store and saved state (0..=3).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Db12 => 0,
            Self::Db24 => 1,
            Self::Db36 => 2,
            Self::Db48 => 3,
        }
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Db12),
            1 => Some(Self::Db24),
            2 => Some(Self::Db36),
            3 => Some(Self::Db48),
            _ => None,
        }
    }

    /// Decode a stored choice value. Non-integral or out-of-range values
    /// yield `None`.
    pub fn from_value(value: f32) -> Option<Self> {
        if !value.is_finite() || value < 0.0 || libm::roundf(value) != value {
            return None;
        }
        Self::from_index(value as usize)
    }

    /// Parse a dB/oct figure (12, 24, 36 or 48).
    #[inline]
    pub const fn from_db_per_octave(db: u32) -> Option<Self> {
        match db {
            12 => Some(Self::Db12),
            24 => Some(Self::Db24),
            36 => Some(Self::Db36),
            48 => Some(Self::Db48),
            _ => None,
        }
    }

    /// Number of cascaded second-order sections (1..=4).
    #[inline]
    pub const fn section_count(self) -> usize {
        self.index() + 1
    }

    /// Total filter order in poles (2, 4, 6 or 8).
    #[inline]
    pub const fn pole_count(self) -> usize {
        2 * self.section_count()
    }

    /// Attenuation per octave in the stop band.
    #[inline]
    pub const fn db_per_octave(self) -> u32 {
        12 * self.section_count() as u32
    }
}

impl fmt::Display for SlopeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dB/Oct", self.db_per_octave())
    }
}
