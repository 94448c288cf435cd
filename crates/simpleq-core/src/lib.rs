//! simpleq Core - real-time filter-chain engine for a stereo parametric EQ
//!
//! The equalizer is a fixed cascade per channel:
//!
//! ```text
//! [low-cut bank: 4 slots] -> [peak] -> [high-cut bank: 4 slots]
//! ```
//!
//! Cut banks are Butterworth highpass/lowpass cascades of 1 to 4 biquads
//! (12/24/36/48 dB/oct). The peak is an RBJ peaking EQ.
//!
//! # Components
//!
//! - [`ParamStore`] - lock-free parameter storage, shared as `Arc<ParamStore>`
//! - [`ParameterSnapshot`] - one consistent read of all parameters
//! - [`compute_peak`], [`compute_highpass_bank`], [`compute_lowpass_bank`] -
//!   pure coefficient design
//! - [`ChannelChain`] / [`CutBank`] - per-channel stages with bypass flags
//! - [`StereoEngine`] - two chains kept coefficient-synchronized
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets; an allocator is
//! still required for `Arc`.
//!
//! ```toml
//! [dependencies]
//! simpleq-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use simpleq_core::{ParamId, ParamStore, SlopeOrder, StereoEngine};
//!
//! let store = Arc::new(ParamStore::new());
//! store.set(ParamId::LOW_CUT_FREQ, 100.0).unwrap();
//! store.set_low_cut_slope(SlopeOrder::Db24);
//!
//! let mut engine = StereoEngine::new(Arc::clone(&store));
//! engine.prepare(48000.0, 512).unwrap();
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! engine.process_stereo(&mut left, &mut right).unwrap();
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocation, locking or blocking while processing
//! - **One snapshot per block**: coefficients and bypass flags come from the same read
//! - **Safe Rust only**: denormals are flushed in the recursion, not via CPU flags

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod chain;
pub mod coefficients;
pub mod engine;
pub mod error;
pub mod math;
pub mod param_info;
pub mod slope;
pub mod snapshot;
pub mod store;

pub use biquad::{
    BUTTERWORTH_Q, Biquad, BiquadCoefficients, butterworth_q, highpass_coefficients,
    lowpass_coefficients, peaking_eq_coefficients, rms_db,
};
pub use chain::{ChainPosition, ChannelChain, CutBank, FilterStage};
pub use coefficients::{
    ChainCoefficients, CutCoefficients, NYQUIST_FRACTION, NYQUIST_MARGIN_HZ, coefficients_for,
    compute_highpass_bank, compute_lowpass_bank, compute_peak, nyquist_guard,
};
pub use engine::StereoEngine;
pub use error::EqError;
pub use math::{DENORMAL_THRESHOLD, db_to_linear, flush_denormal, linear_to_db};
pub use param_info::{
    PARAM_COUNT, PARAMS, ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit,
};
pub use slope::{MAX_SECTIONS, SlopeOrder};
pub use snapshot::{MIN_PEAK_QUALITY, ParameterSnapshot};
pub use store::ParamStore;
