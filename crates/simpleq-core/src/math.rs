//! Small DSP math helpers used by the filter engine.
//!
//! All functions are allocation-free and `no_std` compatible.

use libm::{expf, log10f};

/// Magnitudes below this are treated as denormal-range and flushed to zero.
pub const DENORMAL_THRESHOLD: f64 = 1e-20;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use simpleq_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Non-positive input maps to -120 dB rather than -inf.
///
/// # Example
/// ```rust
/// use simpleq_core::linear_to_db;
///
/// assert!((linear_to_db(1.0)).abs() < 0.001);
/// assert_eq!(linear_to_db(0.0), -120.0);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * log10f(linear)
    }
}

/// Flush values in the subnormal range to zero.
///
/// Applied to IIR recursion state so decaying tails never reach subnormal
/// floats, which are an order of magnitude slower on most CPUs.
#[inline]
pub fn flush_denormal(x: f64) -> f64 {
    if x.abs() < DENORMAL_THRESHOLD { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_conversions() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-6);
        assert!((linear_to_db(10.0) - 20.0).abs() < 1e-4);
        assert!((linear_to_db(db_to_linear(6.0)) - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert_eq!(linear_to_db(0.0), -120.0);
        assert_eq!(linear_to_db(-1.0), -120.0);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-10), 1e-10);

        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-21), 0.0);
        assert_eq!(flush_denormal(1e-38), 0.0);
        assert_eq!(flush_denormal(0.0), 0.0);
    }
}
