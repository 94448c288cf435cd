//! Stereo engine: two channel chains driven from one parameter snapshot.
//!
//! Each call to a `process_*` method takes exactly one snapshot from the
//! shared [`ParamStore`], designs one [`ChainCoefficients`] from it, and loads
//! that same value into both chains. Left and right therefore always agree on
//! coefficients and on which cut slots are enabled, while their delay lines
//! stay independent.
//!
//! Nothing in the processing path allocates, locks, or blocks.

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

use crate::chain::ChannelChain;
use crate::coefficients::{ChainCoefficients, coefficients_for};
use crate::error::EqError;
use crate::slope::SlopeOrder;
use crate::snapshot::ParameterSnapshot;
use crate::store::ParamStore;

/// Processing spec recorded by [`StereoEngine::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct ProcessSpec {
    sample_rate: f32,
    max_block_size: usize,
}

/// The equalizer's audio-side entry point.
///
/// ```rust
/// use std::sync::Arc;
/// use simpleq_core::{EqError, ParamId, ParamStore, StereoEngine};
///
/// let store = Arc::new(ParamStore::new());
/// let mut engine = StereoEngine::new(Arc::clone(&store));
///
/// let mut left = [0.0f32; 256];
/// let mut right = [0.0f32; 256];
/// assert_eq!(
///     engine.process_stereo(&mut left, &mut right),
///     Err(EqError::UnpreparedEngine)
/// );
///
/// engine.prepare(48000.0, 512).unwrap();
/// store.set(ParamId::PEAK_GAIN, 6.0).unwrap();
/// engine.process_stereo(&mut left, &mut right).unwrap();
/// ```
#[derive(Debug)]
pub struct StereoEngine {
    store: Arc<ParamStore>,
    left: ChannelChain,
    right: ChannelChain,
    spec: Option<ProcessSpec>,
    slopes: (SlopeOrder, SlopeOrder),
}

impl StereoEngine {
    /// Create an unprepared engine reading from `store`.
    pub fn new(store: Arc<ParamStore>) -> Self {
        Self {
            store,
            left: ChannelChain::new(),
            right: ChannelChain::new(),
            spec: None,
            slopes: (SlopeOrder::Db12, SlopeOrder::Db12),
        }
    }

    /// Configure for a sample rate and maximum block length.
    ///
    /// Clears both chains' delay lines and loads coefficients from the current
    /// parameters. Call before the first block and whenever the sample rate
    /// changes.
    ///
    /// # Errors
    ///
    /// [`EqError::InvalidSampleRate`] for a rate that is not finite and
    /// positive, [`EqError::InvalidBlockSize`] for a zero block size. The
    /// engine is left unprepared in both cases.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<(), EqError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            self.spec = None;
            return Err(EqError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            self.spec = None;
            return Err(EqError::InvalidBlockSize(max_block_size));
        }

        self.left.reset();
        self.right.reset();
        self.spec = Some(ProcessSpec {
            sample_rate,
            max_block_size,
        });

        let snapshot = self.store.get_snapshot();
        self.slopes = (snapshot.low_cut_slope, snapshot.high_cut_slope);
        self.load(&coefficients_for(&snapshot, sample_rate));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            low_cut_slope = snapshot.low_cut_slope.db_per_octave(),
            high_cut_slope = snapshot.high_cut_slope.db_per_octave(),
            "engine prepared"
        );

        Ok(())
    }

    /// Mark the engine unprepared until the next [`prepare`](Self::prepare).
    pub fn invalidate(&mut self) {
        self.spec = None;
    }

    /// Whether `prepare` has succeeded since creation or the last `invalidate`.
    pub fn is_prepared(&self) -> bool {
        self.spec.is_some()
    }

    /// Prepared sample rate.
    pub fn sample_rate(&self) -> Option<f32> {
        self.spec.map(|s| s.sample_rate)
    }

    /// Prepared maximum block length.
    pub fn max_block_size(&self) -> Option<usize> {
        self.spec.map(|s| s.max_block_size)
    }

    /// Shared parameter store.
    pub fn store(&self) -> &Arc<ParamStore> {
        &self.store
    }

    /// Left (or mono) chain.
    pub fn left(&self) -> &ChannelChain {
        &self.left
    }

    /// Right chain.
    pub fn right(&self) -> &ChannelChain {
        &self.right
    }

    /// Filter a stereo block in place.
    ///
    /// # Errors
    ///
    /// [`EqError::UnpreparedEngine`] before `prepare`, or
    /// [`EqError::BlockTooLarge`] if either channel exceeds the prepared
    /// maximum. Both buffers are untouched on error.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) -> Result<(), EqError> {
        let spec = self.check(&[left.len(), right.len()])?;
        self.refresh(spec.sample_rate);
        self.left.process_block(left);
        self.right.process_block(right);
        Ok(())
    }

    /// Filter a mono block in place through the left chain.
    ///
    /// # Errors
    ///
    /// Same conditions as [`process_stereo`](Self::process_stereo).
    pub fn process_mono(&mut self, samples: &mut [f32]) -> Result<(), EqError> {
        let spec = self.check(&[samples.len()])?;
        self.refresh(spec.sample_rate);
        self.left.process_block(samples);
        Ok(())
    }

    /// Filter a host-style channel list.
    ///
    /// One channel is processed as mono, two as stereo. Channels past the
    /// second are left untouched. An empty list still refreshes coefficients.
    ///
    /// # Errors
    ///
    /// Same conditions as [`process_stereo`](Self::process_stereo).
    pub fn process_channels(&mut self, channels: &mut [&mut [f32]]) -> Result<(), EqError> {
        match channels {
            [] => {
                let spec = self.check(&[])?;
                self.refresh(spec.sample_rate);
                Ok(())
            }
            [mono] => self.process_mono(mono),
            [left, right, ..] => self.process_stereo(left, right),
        }
    }

    /// Magnitude of the currently loaded chain at `freq` Hz, in dB.
    ///
    /// `None` until the engine is prepared.
    pub fn response_db(&self, freq: f32) -> Option<f64> {
        let spec = self.spec?;
        Some(
            self.left
                .magnitude_db(f64::from(freq), f64::from(spec.sample_rate)),
        )
    }

    fn check(&self, lens: &[usize]) -> Result<ProcessSpec, EqError> {
        let spec = self.spec.ok_or(EqError::UnpreparedEngine)?;
        if let Some(&len) = lens.iter().find(|&&len| len > spec.max_block_size) {
            return Err(EqError::BlockTooLarge {
                len,
                max: spec.max_block_size,
            });
        }
        Ok(spec)
    }

    fn refresh(&mut self, sample_rate: f32) {
        let snapshot = self.store.get_snapshot();
        self.note_slopes(&snapshot);
        self.load(&coefficients_for(&snapshot, sample_rate));
    }

    fn load(&mut self, coeffs: &ChainCoefficients) {
        self.left.update(coeffs);
        self.right.update(coeffs);
    }

    fn note_slopes(&mut self, snapshot: &ParameterSnapshot) {
        let slopes = (snapshot.low_cut_slope, snapshot.high_cut_slope);
        if slopes != self.slopes {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                low_cut_slope = slopes.0.db_per_octave(),
                high_cut_slope = slopes.1.db_per_octave(),
                "cut slopes changed"
            );
            self.slopes = slopes;
        }
    }
}
