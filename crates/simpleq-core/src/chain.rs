//! Per-channel filter cascade.
//!
//! A [`ChannelChain`] is a fixed run of nine stages:
//!
//! ```text
//! [low-cut 0..4] -> [peak] -> [high-cut 0..4]
//! ```
//!
//! Stages are never added or removed at runtime. A slope change only moves
//! bypass flags inside a [`CutBank`], and every update re-derives all four
//! flags from scratch so nothing enabled by an earlier, steeper slope can
//! survive.

use crate::biquad::{Biquad, BiquadCoefficients};
use crate::coefficients::{ChainCoefficients, CutCoefficients};
use crate::slope::MAX_SECTIONS;

/// The three regions of a channel chain, in signal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainPosition {
    /// Highpass bank at the head of the chain.
    LowCut,
    /// Peaking section.
    Peak,
    /// Lowpass bank at the tail of the chain.
    HighCut,
}

impl ChainPosition {
    /// All positions in processing order.
    pub const ALL: [Self; 3] = [Self::LowCut, Self::Peak, Self::HighCut];
}

/// One slot of a chain: a biquad plus its bypass flag.
///
/// A bypassed stage is skipped outright; its coefficients and delay line are
/// never read.
#[derive(Debug, Clone, Default)]
pub struct FilterStage {
    filter: Biquad,
    bypassed: bool,
}

impl FilterStage {
    /// Active pass-through stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the coefficients wholesale.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: BiquadCoefficients) {
        self.filter.set_coefficients(coeffs);
    }

    /// Current coefficients.
    #[inline]
    pub fn coefficients(&self) -> &BiquadCoefficients {
        self.filter.coefficients()
    }

    /// Set the bypass flag.
    #[inline]
    pub fn set_bypassed(&mut self, bypassed: bool) {
        self.bypassed = bypassed;
    }

    /// Whether this stage is skipped.
    #[inline]
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Process a block in place unless bypassed.
    #[inline]
    pub fn process_block(&mut self, samples: &mut [f32]) {
        if !self.bypassed {
            self.filter.process_block(samples);
        }
    }

    /// Clear the delay line.
    pub fn reset(&mut self) {
        self.filter.clear();
    }

    /// Whether the delay line is all zeros.
    pub fn is_cleared(&self) -> bool {
        self.filter.is_cleared()
    }
}

/// Four cascaded stages of which the first `slope.section_count()` run.
#[derive(Debug, Clone)]
pub struct CutBank {
    stages: [FilterStage; MAX_SECTIONS],
}

impl CutBank {
    /// A bank with only the first stage enabled, at identity.
    pub fn new() -> Self {
        let mut stages: [FilterStage; MAX_SECTIONS] = Default::default();
        for stage in &mut stages[1..] {
            stage.set_bypassed(true);
        }
        Self { stages }
    }

    /// Load a designed cascade.
    ///
    /// Every slot is bypassed first, then slots `0..coeffs.len()` get fresh
    /// coefficients and are enabled. Slots past that keep whatever they held
    /// and stay bypassed.
    pub fn apply(&mut self, coeffs: &CutCoefficients) {
        for stage in &mut self.stages {
            stage.set_bypassed(true);
        }
        for (stage, section) in self.stages.iter_mut().zip(coeffs.as_slice()) {
            stage.set_coefficients(*section);
            stage.set_bypassed(false);
        }
    }

    /// Number of enabled stages.
    pub fn enabled_count(&self) -> usize {
        self.stages.iter().filter(|s| !s.is_bypassed()).count()
    }

    /// Whether slot `index` is bypassed. Out-of-range slots read as bypassed.
    pub fn is_bypassed(&self, index: usize) -> bool {
        self.stages.get(index).is_none_or(FilterStage::is_bypassed)
    }

    /// Coefficients held by slot `index`, enabled or not.
    pub fn coefficients(&self, index: usize) -> Option<&BiquadCoefficients> {
        self.stages.get(index).map(FilterStage::coefficients)
    }

    /// Stage at `index`.
    pub fn stage(&self, index: usize) -> Option<&FilterStage> {
        self.stages.get(index)
    }

    /// Mutable stage at `index`.
    pub fn stage_mut(&mut self, index: usize) -> Option<&mut FilterStage> {
        self.stages.get_mut(index)
    }

    /// Run the enabled stages in slot order.
    #[inline]
    pub fn process_block(&mut self, samples: &mut [f32]) {
        for stage in &mut self.stages {
            stage.process_block(samples);
        }
    }

    /// Clear every delay line.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }

    /// Summed response of the enabled stages in dB.
    pub fn magnitude_db(&self, freq: f64, sample_rate: f64) -> f64 {
        self.stages
            .iter()
            .filter(|s| !s.is_bypassed())
            .map(|s| s.coefficients().magnitude_db(freq, sample_rate))
            .sum()
    }
}

impl Default for CutBank {
    fn default() -> Self {
        Self::new()
    }
}

/// Low-cut bank, peak, high-cut bank for one mono stream.
///
/// ```rust
/// use simpleq_core::{ChannelChain, ParameterSnapshot, SlopeOrder, coefficients_for};
///
/// let snap = ParameterSnapshot {
///     low_cut_slope: SlopeOrder::Db36,
///     ..ParameterSnapshot::default()
/// };
/// let mut chain = ChannelChain::new();
/// chain.update(&coefficients_for(&snap, 48000.0));
/// assert_eq!(chain.low_cut().enabled_count(), 3);
/// assert_eq!(chain.high_cut().enabled_count(), 1);
///
/// let mut block = [0.0f32; 64];
/// chain.process_block(&mut block);
/// assert!(block.iter().all(|&s| s == 0.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChannelChain {
    low_cut: CutBank,
    peak: FilterStage,
    high_cut: CutBank,
}

impl ChannelChain {
    /// Chain with identity coefficients and one stage enabled per bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a full coefficient set. The peak stage is always enabled.
    pub fn update(&mut self, coeffs: &ChainCoefficients) {
        self.low_cut.apply(&coeffs.low_cut);
        self.peak.set_coefficients(coeffs.peak);
        self.peak.set_bypassed(false);
        self.high_cut.apply(&coeffs.high_cut);
    }

    /// Filter a block in place.
    #[inline]
    pub fn process_block(&mut self, samples: &mut [f32]) {
        self.low_cut.process_block(samples);
        self.peak.process_block(samples);
        self.high_cut.process_block(samples);
    }

    /// Clear every delay line; coefficients and bypass flags are kept.
    pub fn reset(&mut self) {
        self.low_cut.reset();
        self.peak.reset();
        self.high_cut.reset();
    }

    /// Whether every delay line is all zeros.
    pub fn is_cleared(&self) -> bool {
        let bank_clear = |bank: &CutBank| {
            (0..MAX_SECTIONS).all(|i| bank.stage(i).is_some_and(FilterStage::is_cleared))
        };
        bank_clear(&self.low_cut) && self.peak.is_cleared() && bank_clear(&self.high_cut)
    }

    /// Low-cut bank.
    pub fn low_cut(&self) -> &CutBank {
        &self.low_cut
    }

    /// Peak stage.
    pub fn peak(&self) -> &FilterStage {
        &self.peak
    }

    /// High-cut bank.
    pub fn high_cut(&self) -> &CutBank {
        &self.high_cut
    }

    /// Mutable bank access by position. `Peak` has no bank and yields `None`.
    pub fn bank_mut(&mut self, position: ChainPosition) -> Option<&mut CutBank> {
        match position {
            ChainPosition::LowCut => Some(&mut self.low_cut),
            ChainPosition::HighCut => Some(&mut self.high_cut),
            ChainPosition::Peak => None,
        }
    }

    /// Response of one region in dB.
    pub fn region_magnitude_db(&self, position: ChainPosition, freq: f64, sample_rate: f64) -> f64 {
        match position {
            ChainPosition::LowCut => self.low_cut.magnitude_db(freq, sample_rate),
            ChainPosition::Peak => self.peak.coefficients().magnitude_db(freq, sample_rate),
            ChainPosition::HighCut => self.high_cut.magnitude_db(freq, sample_rate),
        }
    }

    /// Response of the whole chain in dB, for drawing a curve.
    pub fn magnitude_db(&self, freq: f64, sample_rate: f64) -> f64 {
        ChainPosition::ALL
            .iter()
            .map(|&p| self.region_magnitude_db(p, freq, sample_rate))
            .sum()
    }
}
