//! Coefficient factory: parameter snapshot in, filter coefficients out.
//!
//! Every function here is pure. The engine calls [`coefficients_for`] once per
//! block and pushes the result into both channel chains, so left and right can
//! never disagree about coefficients or about which cut slots are enabled.

use crate::biquad::{
    BiquadCoefficients, butterworth_q, highpass_coefficients, lowpass_coefficients,
    peaking_eq_coefficients,
};
use crate::error::EqError;
use crate::slope::{MAX_SECTIONS, SlopeOrder};
use crate::snapshot::ParameterSnapshot;

/// Distance kept below Nyquist by [`nyquist_guard`], in Hz.
pub const NYQUIST_MARGIN_HZ: f32 = 1.0;

/// Fraction of Nyquist that [`nyquist_guard`] never exceeds.
pub const NYQUIST_FRACTION: f32 = 0.95;

/// Lowest frequency [`nyquist_guard`] hands on.
const MIN_GUARDED_FREQ_HZ: f32 = 1.0;

/// Coefficients for one cut bank: `len` Butterworth sections, in order.
///
/// Fixed-size so it can be built on the audio thread. Slots past `len` hold
/// [`BiquadCoefficients::IDENTITY`] and are not part of the design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutCoefficients {
    sections: [BiquadCoefficients; MAX_SECTIONS],
    order: SlopeOrder,
}

impl CutCoefficients {
    /// The designed sections; exactly `order.section_count()` long.
    #[inline]
    pub fn as_slice(&self) -> &[BiquadCoefficients] {
        &self.sections[..self.order.section_count()]
    }

    /// Number of designed sections.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.section_count()
    }

    /// Always `false`: every slope has at least one section.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Slope this bank was designed for.
    #[inline]
    pub fn order(&self) -> SlopeOrder {
        self.order
    }

    /// Combined magnitude of the designed sections in dB.
    pub fn magnitude_db(&self, freq: f64, sample_rate: f64) -> f64 {
        self.as_slice()
            .iter()
            .map(|c| c.magnitude_db(freq, sample_rate))
            .sum()
    }
}

/// Everything one channel chain needs for a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainCoefficients {
    /// Highpass sections for the low-cut bank.
    pub low_cut: CutCoefficients,
    /// Peaking section.
    pub peak: BiquadCoefficients,
    /// Lowpass sections for the high-cut bank.
    pub high_cut: CutCoefficients,
}

fn check_input(freq: f32, sample_rate: f32) -> Result<(), EqError> {
    let degenerate = !sample_rate.is_finite()
        || sample_rate <= 0.0
        || !freq.is_finite()
        || freq <= 0.0
        || freq >= sample_rate / 2.0;
    if degenerate {
        Err(EqError::DegenerateFilterInput { freq, sample_rate })
    } else {
        Ok(())
    }
}

/// Peaking (bell) coefficients for the snapshot's peak band.
///
/// Q is taken from [`ParameterSnapshot::effective_quality`], so a stored
/// quality of zero or below still yields a stable filter.
///
/// # Errors
///
/// [`EqError::DegenerateFilterInput`] if the sample rate is not positive or
/// the centre frequency is at or above Nyquist.
pub fn compute_peak(
    sample_rate: f32,
    snapshot: &ParameterSnapshot,
) -> Result<BiquadCoefficients, EqError> {
    check_input(snapshot.peak_freq_hz, sample_rate)?;
    Ok(peaking_eq_coefficients(
        f64::from(snapshot.peak_freq_hz),
        f64::from(snapshot.effective_quality()),
        f64::from(snapshot.peak_gain_db),
        f64::from(sample_rate),
    ))
}

fn butterworth_bank(
    cutoff_hz: f32,
    sample_rate: f32,
    order: SlopeOrder,
    design: fn(f64, f64, f64) -> BiquadCoefficients,
) -> Result<CutCoefficients, EqError> {
    check_input(cutoff_hz, sample_rate)?;

    let poles = order.pole_count();
    let mut sections = [BiquadCoefficients::IDENTITY; MAX_SECTIONS];
    for (k, section) in sections.iter_mut().take(order.section_count()).enumerate() {
        *section = design(
            f64::from(cutoff_hz),
            butterworth_q(k, poles),
            f64::from(sample_rate),
        );
    }
    Ok(CutCoefficients { sections, order })
}

/// Butterworth highpass cascade for the low-cut bank.
///
/// Returns `order.section_count()` sections (2, 4, 6 or 8 poles). Section `k`
/// always lands at index `k` and carries the k-th Butterworth pole pair.
///
/// # Errors
///
/// [`EqError::DegenerateFilterInput`] for a non-positive rate or a cutoff at
/// or above Nyquist.
pub fn compute_highpass_bank(
    cutoff_hz: f32,
    sample_rate: f32,
    order: SlopeOrder,
) -> Result<CutCoefficients, EqError> {
    butterworth_bank(cutoff_hz, sample_rate, order, highpass_coefficients)
}

/// Butterworth lowpass cascade for the high-cut bank.
///
/// # Errors
///
/// Same conditions as [`compute_highpass_bank`].
pub fn compute_lowpass_bank(
    cutoff_hz: f32,
    sample_rate: f32,
    order: SlopeOrder,
) -> Result<CutCoefficients, EqError> {
    butterworth_bank(cutoff_hz, sample_rate, order, lowpass_coefficients)
}

/// Pull a frequency safely below Nyquist.
///
/// The result is at most `sample_rate/2 - NYQUIST_MARGIN_HZ` and at most
/// `NYQUIST_FRACTION` of Nyquist. At very low sample rates, where the margin
/// would swallow the whole band, half of Nyquist is the ceiling instead.
///
/// ```rust
/// use simpleq_core::nyquist_guard;
///
/// assert_eq!(nyquist_guard(1000.0, 48000.0), 1000.0);
/// assert!(nyquist_guard(20000.0, 32000.0) <= 15200.0);
/// ```
pub fn nyquist_guard(freq: f32, sample_rate: f32) -> f32 {
    let nyquist = sample_rate / 2.0;
    let limit = (nyquist * NYQUIST_FRACTION)
        .min(nyquist - NYQUIST_MARGIN_HZ)
        .max(nyquist * 0.5);
    if freq.is_nan() {
        return limit;
    }
    freq.max(MIN_GUARDED_FREQ_HZ.min(limit)).min(limit)
}

/// Full coefficient set for one block.
///
/// Frequencies pass through [`nyquist_guard`] first, so for any finite
/// positive sample rate the factory calls cannot fail. Should one fail anyway
/// the affected stage falls back to identity rather than stopping audio.
pub fn coefficients_for(snapshot: &ParameterSnapshot, sample_rate: f32) -> ChainCoefficients {
    let guarded = ParameterSnapshot {
        peak_freq_hz: nyquist_guard(snapshot.peak_freq_hz, sample_rate),
        low_cut_freq_hz: nyquist_guard(snapshot.low_cut_freq_hz, sample_rate),
        high_cut_freq_hz: nyquist_guard(snapshot.high_cut_freq_hz, sample_rate),
        ..*snapshot
    };

    let identity_bank = |order| CutCoefficients {
        sections: [BiquadCoefficients::IDENTITY; MAX_SECTIONS],
        order,
    };

    ChainCoefficients {
        low_cut: compute_highpass_bank(guarded.low_cut_freq_hz, sample_rate, guarded.low_cut_slope)
            .unwrap_or_else(|_| identity_bank(guarded.low_cut_slope)),
        peak: compute_peak(sample_rate, &guarded).unwrap_or(BiquadCoefficients::IDENTITY),
        high_cut: compute_lowpass_bank(
            guarded.high_cut_freq_hz,
            sample_rate,
            guarded.high_cut_slope,
        )
        .unwrap_or_else(|_| identity_bank(guarded.high_cut_slope)),
    }
}
