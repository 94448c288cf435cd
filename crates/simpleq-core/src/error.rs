//! Error kinds for the filter engine.

#[cfg(not(feature = "std"))]
use alloc::string::String;
use thiserror::Error;

/// Errors raised by the parameter store, coefficient factory, and engine.
///
/// None of these cross a block boundary on the audio path: the engine guards
/// filter inputs before calling the factory and checks its own preconditions
/// before touching any sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EqError {
    /// A parameter write was outside the declared range. The prior value is kept.
    #[error("invalid value {value} for parameter '{name}' (expected {min}..={max})")]
    InvalidParameter {
        /// Stable string id of the parameter.
        name: &'static str,
        /// Rejected value.
        value: f32,
        /// Declared minimum.
        min: f32,
        /// Declared maximum.
        max: f32,
    },

    /// No parameter is registered under this name.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Frequency at or above Nyquist, or a non-positive sample rate.
    #[error("degenerate filter input: {freq} Hz at sample rate {sample_rate} Hz")]
    DegenerateFilterInput {
        /// Requested cutoff or centre frequency.
        freq: f32,
        /// Sample rate the coefficients were requested for.
        sample_rate: f32,
    },

    /// `process_*` was called before `prepare`, or after `invalidate`.
    #[error("engine is not prepared; call prepare() first")]
    UnpreparedEngine,

    /// `prepare` was given a sample rate that is not finite and positive.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    /// `prepare` was given a zero block size.
    #[error("invalid maximum block size: {0}")]
    InvalidBlockSize(usize),

    /// A block longer than the prepared maximum was submitted.
    #[error("block of {len} samples exceeds prepared maximum of {max}")]
    BlockTooLarge {
        /// Length of the submitted channel.
        len: usize,
        /// Maximum passed to `prepare`.
        max: usize,
    },
}
