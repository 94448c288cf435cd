//! Biquad (bi-quadratic) filter section.
//!
//! [`BiquadCoefficients`] is a plain value: five coefficients normalized by
//! `a0`. A [`Biquad`] owns one coefficient set plus its Direct Form I delay
//! line. Coefficients are always replaced wholesale with
//! [`Biquad::set_coefficients`], never patched field by field, so a section
//! can never run with half of an old set and half of a new one.
//!
//! Design formulas follow the RBJ Audio EQ Cookbook. Coefficients and the
//! delay line are `f64` while samples stay `f32`: at low cutoffs the poles sit
//! very close to the unit circle, where single-precision coefficients distort
//! the response and single-precision feedback amplifies round-off.

use core::f64::consts::PI;
use libm::{cos, log10, pow, sin, sqrt};

use crate::math::flush_denormal;

/// Normalized coefficients of one second-order IIR section.
///
/// ```text
/// H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficient for x\[n\].
    pub b0: f64,
    /// Feedforward coefficient for x\[n-1\].
    pub b1: f64,
    /// Feedforward coefficient for x\[n-2\].
    pub b2: f64,
    /// Feedback coefficient for y\[n-1\].
    pub a1: f64,
    /// Feedback coefficient for y\[n-2\].
    pub a2: f64,
}

impl BiquadCoefficients {
    /// Pass-through section: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Build from raw cookbook coefficients, normalizing by `a0`.
    pub fn from_raw(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Whether every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }

    /// Squared magnitude `|H(e^jω)|²` at `freq` Hz.
    pub fn magnitude_squared(&self, freq: f64, sample_rate: f64) -> f64 {
        let w = 2.0 * PI * freq / sample_rate;
        let (cos1, sin1) = (cos(w), sin(w));
        let (cos2, sin2) = (cos(2.0 * w), sin(2.0 * w));

        let Self { b0, b1, b2, a1, a2 } = *self;

        let num_re = b0 + b1 * cos1 + b2 * cos2;
        let num_im = b1 * sin1 + b2 * sin2;
        let den_re = 1.0 + a1 * cos1 + a2 * cos2;
        let den_im = a1 * sin1 + a2 * sin2;

        (num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im)
    }

    /// Magnitude response in dB at `freq` Hz.
    pub fn magnitude_db(&self, freq: f64, sample_rate: f64) -> f64 {
        let mag_sq = self.magnitude_squared(freq, sample_rate);
        if mag_sq <= 0.0 {
            return -240.0;
        }
        10.0 * log10(mag_sq)
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Peaking EQ coefficients (RBJ cookbook).
///
/// Boosts or cuts a band around `frequency`. `gain_db` is the linear gain
/// `10^(gain_db/20)` at the centre; `q` controls bandwidth and must be > 0.
pub fn peaking_eq_coefficients(
    frequency: f64,
    q: f64,
    gain_db: f64,
    sample_rate: f64,
) -> BiquadCoefficients {
    let a = pow(10.0, gain_db / 40.0); // sqrt(10^(dB/20))
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);

    BiquadCoefficients::from_raw(
        1.0 + alpha * a,
        -2.0 * cos_omega,
        1.0 - alpha * a,
        1.0 + alpha / a,
        -2.0 * cos_omega,
        1.0 - alpha / a,
    )
}

/// Second-order highpass section (RBJ cookbook) with quality `q`.
pub fn highpass_coefficients(frequency: f64, q: f64, sample_rate: f64) -> BiquadCoefficients {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);

    BiquadCoefficients::from_raw(
        (1.0 + cos_omega) / 2.0,
        -(1.0 + cos_omega),
        (1.0 + cos_omega) / 2.0,
        1.0 + alpha,
        -2.0 * cos_omega,
        1.0 - alpha,
    )
}

/// Second-order lowpass section (RBJ cookbook) with quality `q`.
pub fn lowpass_coefficients(frequency: f64, q: f64, sample_rate: f64) -> BiquadCoefficients {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);

    BiquadCoefficients::from_raw(
        (1.0 - cos_omega) / 2.0,
        1.0 - cos_omega,
        (1.0 - cos_omega) / 2.0,
        1.0 + alpha,
        -2.0 * cos_omega,
        1.0 - alpha,
    )
}

/// Quality of section `k` (0-based) in an `poles`-pole Butterworth cascade.
///
/// `Q_k = 1 / (2 sin((2k + 1) π / (2N)))`. For a 2-pole filter this is
/// `1/√2`; for 4 poles the sections get 1.307 and 0.541.
pub fn butterworth_q(k: usize, poles: usize) -> f64 {
    let angle = (2 * k + 1) as f64 * PI / (2 * poles) as f64;
    1.0 / (2.0 * sin(angle))
}

/// Q of a single 2-pole Butterworth section.
pub const BUTTERWORTH_Q: f64 = core::f64::consts::FRAC_1_SQRT_2;

/// Second-order IIR filter: coefficients plus Direct Form I state.
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: BiquadCoefficients,

    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a pass-through biquad with cleared state.
    pub fn new() -> Self {
        Self::with_coefficients(BiquadCoefficients::IDENTITY)
    }

    /// Creates a biquad with the given coefficients and cleared state.
    pub fn with_coefficients(coeffs: BiquadCoefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Replaces the coefficient set. The delay line is kept.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: BiquadCoefficients) {
        self.coeffs = coeffs;
    }

    /// Current coefficient set.
    #[inline]
    pub fn coefficients(&self) -> &BiquadCoefficients {
        &self.coeffs
    }

    /// Processes a single sample.
    ///
    /// The recursion runs in `f64`. The fed-back output is flushed to zero
    /// once it decays below the denormal threshold.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let x = f64::from(input);
        let output = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;
        let output = flush_denormal(output);

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = output;

        output as f32
    }

    /// Processes a block in place.
    #[inline]
    pub fn process_block(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clears the delay line without touching the coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Whether the delay line holds only zeros.
    pub fn is_cleared(&self) -> bool {
        self.x1 == 0.0 && self.x2 == 0.0 && self.y1 == 0.0 && self.y2 == 0.0
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// RMS gain in dB of a steady-state response; used by tests and the CLI.
pub fn rms_db(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return -120.0;
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    let rms = sqrt(sum / samples.len() as f64);
    crate::math::linear_to_db(rms as f32)
}
