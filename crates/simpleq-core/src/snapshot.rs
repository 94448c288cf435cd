//! Point-in-time copy of all equalizer parameters.

use crate::error::EqError;
use crate::param_info::{PARAM_COUNT, ParamId};
use crate::slope::SlopeOrder;

/// Lowest Q handed to the peaking-filter design.
///
/// The stored quality range reaches down to -0.1 for compatibility with saved
/// state, but Q <= 0 has no meaning for a peaking biquad.
pub const MIN_PEAK_QUALITY: f32 = 0.05;

/// Immutable copy of every parameter, taken once per processing block.
///
/// The audio thread derives both the filter coefficients and the cut-bank
/// enable decisions from the same snapshot, so a slope change can never be
/// paired with coefficients from a different read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    /// Peak filter centre frequency in Hz.
    pub peak_freq_hz: f32,
    /// Peak filter gain in dB.
    pub peak_gain_db: f32,
    /// Peak filter quality as stored. May be <= 0; see
    /// [`effective_quality`](Self::effective_quality).
    pub peak_quality: f32,
    /// Low-cut frequency in Hz.
    pub low_cut_freq_hz: f32,
    /// High-cut frequency in Hz.
    pub high_cut_freq_hz: f32,
    /// Low-cut steepness.
    pub low_cut_slope: SlopeOrder,
    /// High-cut steepness.
    pub high_cut_slope: SlopeOrder,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            peak_freq_hz: 750.0,
            peak_gain_db: 0.0,
            peak_quality: 1.0,
            low_cut_freq_hz: 20.0,
            high_cut_freq_hz: 20000.0,
            low_cut_slope: SlopeOrder::Db12,
            high_cut_slope: SlopeOrder::Db12,
        }
    }
}

impl ParameterSnapshot {
    /// Q used for coefficient math, floored at [`MIN_PEAK_QUALITY`].
    #[inline]
    pub fn effective_quality(&self) -> f32 {
        if self.peak_quality.is_nan() {
            return MIN_PEAK_QUALITY;
        }
        self.peak_quality.max(MIN_PEAK_QUALITY)
    }

    /// Raw stored value for a parameter. Slopes read as their choice index.
    pub fn get(&self, id: ParamId) -> Option<f32> {
        let value = match id {
            ParamId::LOW_CUT_FREQ => self.low_cut_freq_hz,
            ParamId::HIGH_CUT_FREQ => self.high_cut_freq_hz,
            ParamId::PEAK_FREQ => self.peak_freq_hz,
            ParamId::PEAK_GAIN => self.peak_gain_db,
            ParamId::PEAK_QUALITY => self.peak_quality,
            ParamId::LOW_CUT_SLOPE => self.low_cut_slope.index() as f32,
            ParamId::HIGH_CUT_SLOPE => self.high_cut_slope.index() as f32,
            _ => return None,
        };
        Some(value)
    }

    /// Returns a copy with one parameter replaced, validated against its
    /// declared range.
    ///
    /// ```rust
    /// use simpleq_core::{ParamId, ParameterSnapshot};
    ///
    /// let snap = ParameterSnapshot::default()
    ///     .with(ParamId::PEAK_GAIN, 6.0)
    ///     .unwrap();
    /// assert_eq!(snap.peak_gain_db, 6.0);
    /// assert!(snap.with(ParamId::PEAK_FREQ, 25000.0).is_err());
    /// ```
    pub fn with(mut self, id: ParamId, value: f32) -> Result<Self, EqError> {
        validate(id, value)?;
        match id {
            ParamId::LOW_CUT_FREQ => self.low_cut_freq_hz = value,
            ParamId::HIGH_CUT_FREQ => self.high_cut_freq_hz = value,
            ParamId::PEAK_FREQ => self.peak_freq_hz = value,
            ParamId::PEAK_GAIN => self.peak_gain_db = value,
            ParamId::PEAK_QUALITY => self.peak_quality = value,
            ParamId::LOW_CUT_SLOPE | ParamId::HIGH_CUT_SLOPE => {
                // validate() guarantees an integral index in 0..=3
                let slope = SlopeOrder::from_value(value).unwrap_or_default();
                if id == ParamId::LOW_CUT_SLOPE {
                    self.low_cut_slope = slope;
                } else {
                    self.high_cut_slope = slope;
                }
            }
            _ => return Err(EqError::UnknownParameter(unknown_id_name(id))),
        }
        Ok(self)
    }

    /// All raw values in [`ParamId::ALL`] order.
    pub fn values(&self) -> [f32; PARAM_COUNT] {
        let mut out = [0.0; PARAM_COUNT];
        for (slot, id) in out.iter_mut().zip(ParamId::ALL) {
            *slot = self.get(id).unwrap_or_default();
        }
        out
    }

    /// Checks every field against its declared range.
    pub fn validate(&self) -> Result<(), EqError> {
        for id in ParamId::ALL {
            if let Some(value) = self.get(id) {
                validate(id, value)?;
            }
        }
        Ok(())
    }
}

/// Validates a single raw value against the parameter's declared range.
pub(crate) fn validate(id: ParamId, value: f32) -> Result<(), EqError> {
    let Some(desc) = id.descriptor() else {
        return Err(EqError::UnknownParameter(unknown_id_name(id)));
    };
    if desc.contains(value) {
        Ok(())
    } else {
        Err(EqError::InvalidParameter {
            name: desc.string_id,
            value,
            min: desc.min,
            max: desc.max,
        })
    }
}

#[cfg(feature = "std")]
fn unknown_id_name(id: ParamId) -> String {
    format!("#{}", id.0)
}

#[cfg(not(feature = "std"))]
fn unknown_id_name(id: ParamId) -> alloc::string::String {
    alloc::format!("#{}", id.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_descriptors() {
        let snap = ParameterSnapshot::default();
        for id in ParamId::ALL {
            let desc = id.descriptor().unwrap();
            assert_eq!(snap.get(id), Some(desc.default), "{}", desc.string_id);
        }
    }

    #[test]
    fn test_effective_quality_floor() {
        let mut snap = ParameterSnapshot::default();
        snap.peak_quality = -0.1;
        assert_eq!(snap.effective_quality(), MIN_PEAK_QUALITY);
        snap.peak_quality = 0.0;
        assert_eq!(snap.effective_quality(), MIN_PEAK_QUALITY);
        snap.peak_quality = 2.5;
        assert_eq!(snap.effective_quality(), 2.5);
        snap.peak_quality = f32::NAN;
        assert_eq!(snap.effective_quality(), MIN_PEAK_QUALITY);
    }

    #[test]
    fn test_with_slope_index() {
        let snap = ParameterSnapshot::default()
            .with(ParamId::HIGH_CUT_SLOPE, 3.0)
            .unwrap();
        assert_eq!(snap.high_cut_slope, SlopeOrder::Db48);
        assert_eq!(snap.low_cut_slope, SlopeOrder::Db12);
        assert!(snap.with(ParamId::LOW_CUT_SLOPE, 2.5).is_err());
    }

    #[test]
    fn test_with_rejects_foreign_id() {
        let err = ParameterSnapshot::default()
            .with(ParamId(7), 1.0)
            .unwrap_err();
        assert!(matches!(err, EqError::UnknownParameter(_)));
    }

    #[test]
    fn test_validate_catches_bad_field() {
        let mut snap = ParameterSnapshot::default();
        assert!(snap.validate().is_ok());
        snap.peak_gain_db = 30.0;
        assert!(matches!(
            snap.validate(),
            Err(EqError::InvalidParameter { name: "peak_gain", .. })
        ));
    }

    #[test]
    fn test_values_order() {
        let snap = ParameterSnapshot::default();
        assert_eq!(snap.values(), [20.0, 20000.0, 750.0, 0.0, 1.0, 0.0, 0.0]);
    }
}
