//! Parameter metadata for the equalizer.
//!
//! Seven parameters drive the filter engine. Each one is described by a
//! [`ParamDescriptor`] carrying its display names, unit, range, default, step,
//! and the stable identifiers used for host automation and saved state.
//!
//! | ParamId | string id | Range | Default | Unit |
//! |---------|-----------|-------|---------|------|
//! | 100 | `low_cut_freq` | 20–20000 | 20 | Hz |
//! | 101 | `high_cut_freq` | 20–20000 | 20000 | Hz |
//! | 102 | `peak_freq` | 20–20000 | 750 | Hz |
//! | 103 | `peak_gain` | -24–24 | 0 | dB |
//! | 104 | `peak_quality` | -0.1–10 | 1.0 | Q |
//! | 105 | `low_cut_slope` | 0–3 | 0 (12 dB/Oct) | choice |
//! | 106 | `high_cut_slope` | 0–3 | 0 (12 dB/Oct) | choice |
//!
//! The string ids and ranges are part of the saved-state contract and must
//! not change.

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\] space.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Linear mapping (default).
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values; requires `min > 0.0`.
    Logarithmic,
}

/// Stable parameter identifier.
///
/// Once assigned, a `ParamId` never changes for a given parameter. The engine's
/// parameters are numbered sequentially from [`ParamId::BASE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

impl ParamId {
    /// First id of the equalizer's parameter block.
    pub const BASE: u32 = 100;

    /// Low-cut (highpass) frequency in Hz.
    pub const LOW_CUT_FREQ: Self = Self(100);
    /// High-cut (lowpass) frequency in Hz.
    pub const HIGH_CUT_FREQ: Self = Self(101);
    /// Peak filter centre frequency in Hz.
    pub const PEAK_FREQ: Self = Self(102);
    /// Peak filter gain in dB.
    pub const PEAK_GAIN: Self = Self(103);
    /// Peak filter quality (Q).
    pub const PEAK_QUALITY: Self = Self(104);
    /// Low-cut slope choice index.
    pub const LOW_CUT_SLOPE: Self = Self(105);
    /// High-cut slope choice index.
    pub const HIGH_CUT_SLOPE: Self = Self(106);

    /// All parameter ids in table order.
    pub const ALL: [Self; PARAM_COUNT] = [
        Self::LOW_CUT_FREQ,
        Self::HIGH_CUT_FREQ,
        Self::PEAK_FREQ,
        Self::PEAK_GAIN,
        Self::PEAK_QUALITY,
        Self::LOW_CUT_SLOPE,
        Self::HIGH_CUT_SLOPE,
    ];

    /// Zero-based position in [`PARAMS`], or `None` for a foreign id.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        let offset = self.0.wrapping_sub(Self::BASE) as usize;
        if offset < PARAM_COUNT {
            Some(offset)
        } else {
            None
        }
    }

    /// Descriptor for this id, or `None` for a foreign id.
    pub fn descriptor(self) -> Option<&'static ParamDescriptor> {
        self.index().map(|i| &PARAMS[i])
    }

    /// Looks up an id by its stable string id (case-insensitive) or by
    /// display name.
    pub fn from_name(name: &str) -> Option<Self> {
        PARAMS
            .iter()
            .find(|d| {
                d.string_id.eq_ignore_ascii_case(name)
                    || d.name.eq_ignore_ascii_case(name)
                    || d.short_name.eq_ignore_ascii_case(name)
            })
            .map(|d| d.id)
    }
}

/// Parameter capability flags for host communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (choice parameters).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels.
    Decibels,
    /// Hertz.
    Hertz,
    /// Filter quality factor.
    Quality,
    /// Slope choice, displayed as dB per octave.
    DecibelsPerOctave,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use simpleq_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::Quality.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Quality => "",
            ParamUnit::DecibelsPerOctave => " dB/Oct",
        }
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name for compact displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit type for formatting the value.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value on construction and after reset.
    pub default: f32,
    /// Control increment.
    pub step: f32,
    /// Stable numeric id.
    pub id: ParamId,
    /// Stable string id, used as the key in saved state.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Host capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    const fn frequency(
        name: &'static str,
        short_name: &'static str,
        id: ParamId,
        string_id: &'static str,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min: 20.0,
            max: 20000.0,
            default,
            step: 1.0,
            id,
            string_id,
            scale: ParamScale::Logarithmic,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    const fn slope(
        name: &'static str,
        short_name: &'static str,
        id: ParamId,
        string_id: &'static str,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::DecibelsPerOctave,
            min: 0.0,
            max: 3.0,
            default: 0.0,
            step: 1.0,
            id,
            string_id,
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Whether `value` is finite and inside `[min, max]`.
    ///
    /// Stepped parameters additionally require an integral value.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        if !value.is_finite() || value < self.min || value > self.max {
            return false;
        }
        !self.flags.contains(ParamFlags::STEPPED) || libm::roundf(value) == value
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// ```rust
    /// use simpleq_core::ParamId;
    ///
    /// let desc = ParamId::PEAK_GAIN.descriptor().unwrap();
    /// assert_eq!(desc.clamp(0.0), 0.0);
    /// assert_eq!(desc.clamp(-100.0), -24.0);
    /// assert_eq!(desc.clamp(100.0), 24.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain range.
    ///
    /// Stepped parameters snap to the nearest step.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let plain = match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        };
        if self.flags.contains(ParamFlags::STEPPED) {
            self.clamp(libm::roundf(plain))
        } else {
            plain
        }
    }
}

/// Number of equalizer parameters.
pub const PARAM_COUNT: usize = 7;

/// Descriptor table, indexed by [`ParamId::index`].
pub static PARAMS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::frequency(
        "Low Cut Freq",
        "LowCut",
        ParamId::LOW_CUT_FREQ,
        "low_cut_freq",
        20.0,
    ),
    ParamDescriptor::frequency(
        "High Cut Freq",
        "HighCut",
        ParamId::HIGH_CUT_FREQ,
        "high_cut_freq",
        20000.0,
    ),
    ParamDescriptor::frequency("Peak Freq", "PeakFreq", ParamId::PEAK_FREQ, "peak_freq", 750.0),
    ParamDescriptor {
        name: "Peak Gain",
        short_name: "PeakGain",
        unit: ParamUnit::Decibels,
        min: -24.0,
        max: 24.0,
        default: 0.0,
        step: 0.5,
        id: ParamId::PEAK_GAIN,
        string_id: "peak_gain",
        scale: ParamScale::Linear,
        flags: ParamFlags::AUTOMATABLE,
    },
    ParamDescriptor {
        name: "Peak Quality",
        short_name: "PeakQ",
        unit: ParamUnit::Quality,
        min: -0.1,
        max: 10.0,
        default: 1.0,
        step: 0.05,
        id: ParamId::PEAK_QUALITY,
        string_id: "peak_quality",
        scale: ParamScale::Linear,
        flags: ParamFlags::AUTOMATABLE,
    },
    ParamDescriptor::slope("Low Cut Slope", "LCSlope", ParamId::LOW_CUT_SLOPE, "low_cut_slope"),
    ParamDescriptor::slope("High Cut Slope", "HCSlope", ParamId::HIGH_CUT_SLOPE, "high_cut_slope"),
];
