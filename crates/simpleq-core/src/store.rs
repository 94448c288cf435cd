//! Lock-free parameter storage shared between the control and audio contexts.
//!
//! Values are stored as `f32` bit-cast into `AtomicU32`, one atomic per
//! parameter. Writes are validated on the control side; the audio side only
//! ever loads. There is no queue and no history: a write is either observed by
//! the next [`ParamStore::get_snapshot`] or it is not.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::EqError;
use crate::param_info::{PARAM_COUNT, PARAMS, ParamId};
use crate::slope::SlopeOrder;
use crate::snapshot::{ParameterSnapshot, validate};

/// Current parameter values, readable from any thread without locking.
///
/// Share it as `Arc<ParamStore>` between the control surface, the persistence
/// layer, and the [`StereoEngine`](crate::StereoEngine).
///
/// ```rust
/// use simpleq_core::{ParamId, ParamStore};
///
/// let store = ParamStore::new();
/// store.set(ParamId::PEAK_GAIN, 6.0).unwrap();
/// assert!(store.set(ParamId::PEAK_FREQ, 25000.0).is_err());
///
/// let snap = store.get_snapshot();
/// assert_eq!(snap.peak_gain_db, 6.0);
/// assert_eq!(snap.peak_freq_hz, 750.0);
/// ```
#[derive(Debug)]
pub struct ParamStore {
    values: [AtomicU32; PARAM_COUNT],
}

impl ParamStore {
    /// Create a store holding every parameter's default.
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|i| AtomicU32::new(PARAMS[i].default.to_bits())),
        }
    }

    /// Create a store initialised from a snapshot.
    pub fn from_snapshot(snapshot: &ParameterSnapshot) -> Result<Self, EqError> {
        let store = Self::new();
        store.apply_snapshot(snapshot)?;
        Ok(store)
    }

    /// Validate and store a value.
    ///
    /// Out-of-range or non-finite values are rejected with
    /// [`EqError::InvalidParameter`] and the prior value is kept. Slope
    /// parameters take their choice index (0..=3).
    pub fn set(&self, id: ParamId, value: f32) -> Result<(), EqError> {
        validate(id, value)?;
        self.store_index(id, value);
        Ok(())
    }

    /// Resolve a parameter by string id or display name, then [`set`](Self::set) it.
    pub fn set_by_name(&self, name: &str, value: f32) -> Result<(), EqError> {
        let id = ParamId::from_name(name).ok_or_else(|| EqError::UnknownParameter(name.into()))?;
        self.set(id, value)
    }

    /// Store the low-cut slope selector.
    pub fn set_low_cut_slope(&self, slope: SlopeOrder) {
        self.store_index(ParamId::LOW_CUT_SLOPE, slope.index() as f32);
    }

    /// Store the high-cut slope selector.
    pub fn set_high_cut_slope(&self, slope: SlopeOrder) {
        self.store_index(ParamId::HIGH_CUT_SLOPE, slope.index() as f32);
    }

    #[inline]
    fn store_index(&self, id: ParamId, value: f32) {
        if let Some(index) = id.index() {
            self.values[index].store(value.to_bits(), Ordering::Release);
        }
    }

    /// Read one parameter (lock-free). Foreign ids read as `None`.
    #[inline]
    pub fn get(&self, id: ParamId) -> Option<f32> {
        id.index()
            .map(|i| f32::from_bits(self.values[i].load(Ordering::Acquire)))
    }

    /// Read all parameters into a snapshot.
    ///
    /// Each scalar is loaded atomically. Two fields may straddle a concurrent
    /// write; any single field is always a value that passed validation.
    pub fn get_snapshot(&self) -> ParameterSnapshot {
        let load = |id: ParamId| {
            id.index()
                .map_or(0.0, |i| f32::from_bits(self.values[i].load(Ordering::Acquire)))
        };
        ParameterSnapshot {
            peak_freq_hz: load(ParamId::PEAK_FREQ),
            peak_gain_db: load(ParamId::PEAK_GAIN),
            peak_quality: load(ParamId::PEAK_QUALITY),
            low_cut_freq_hz: load(ParamId::LOW_CUT_FREQ),
            high_cut_freq_hz: load(ParamId::HIGH_CUT_FREQ),
            low_cut_slope: SlopeOrder::from_value(load(ParamId::LOW_CUT_SLOPE))
                .unwrap_or_default(),
            high_cut_slope: SlopeOrder::from_value(load(ParamId::HIGH_CUT_SLOPE))
                .unwrap_or_default(),
        }
    }

    /// Replace every parameter from a snapshot.
    ///
    /// All fields are validated before the first store, so a rejected
    /// snapshot leaves the store exactly as it was.
    pub fn apply_snapshot(&self, snapshot: &ParameterSnapshot) -> Result<(), EqError> {
        snapshot.validate()?;
        for (atomic, value) in self.values.iter().zip(snapshot.values()) {
            atomic.store(value.to_bits(), Ordering::Release);
        }
        Ok(())
    }

    /// Restore every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for (atomic, desc) in self.values.iter().zip(PARAMS.iter()) {
            atomic.store(desc.default.to_bits(), Ordering::Release);
        }
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_holds_defaults() {
        let store = ParamStore::new();
        assert_eq!(store.get_snapshot(), ParameterSnapshot::default());
        for desc in &PARAMS {
            assert_eq!(store.get(desc.id), Some(desc.default));
        }
    }

    #[test]
    fn test_set_and_get() {
        let store = ParamStore::new();
        store.set(ParamId::LOW_CUT_FREQ, 120.0).unwrap();
        store.set(ParamId::PEAK_QUALITY, 2.5).unwrap();
        store.set(ParamId::HIGH_CUT_SLOPE, 2.0).unwrap();

        let snap = store.get_snapshot();
        assert_eq!(snap.low_cut_freq_hz, 120.0);
        assert_eq!(snap.peak_quality, 2.5);
        assert_eq!(snap.high_cut_slope, SlopeOrder::Db36);
    }

    #[test]
    fn test_rejected_write_keeps_prior_value() {
        let store = ParamStore::new();
        store.set(ParamId::PEAK_FREQ, 1000.0).unwrap();

        let err = store.set(ParamId::PEAK_FREQ, 25000.0).unwrap_err();
        assert!(matches!(err, EqError::InvalidParameter { name: "peak_freq", .. }));
        assert_eq!(store.get_snapshot().peak_freq_hz, 1000.0);

        assert!(store.set(ParamId::PEAK_GAIN, f32::NAN).is_err());
        assert_eq!(store.get(ParamId::PEAK_GAIN), Some(0.0));
    }

    #[test]
    fn test_negative_quality_accepted_as_stored() {
        let store = ParamStore::new();
        store.set(ParamId::PEAK_QUALITY, -0.1).unwrap();
        let snap = store.get_snapshot();
        assert_eq!(snap.peak_quality, -0.1);
        assert!(snap.effective_quality() > 0.0);
    }

    #[test]
    fn test_set_by_name() {
        let store = ParamStore::new();
        store.set_by_name("peak_gain", -3.5).unwrap();
        assert_eq!(store.get(ParamId::PEAK_GAIN), Some(-3.5));
        assert!(matches!(
            store.set_by_name("drive", 1.0),
            Err(EqError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_set_slopes() {
        let store = ParamStore::new();
        store.set_low_cut_slope(SlopeOrder::Db48);
        store.set_high_cut_slope(SlopeOrder::Db24);
        let snap = store.get_snapshot();
        assert_eq!(snap.low_cut_slope, SlopeOrder::Db48);
        assert_eq!(snap.high_cut_slope, SlopeOrder::Db24);
        assert_eq!(store.get(ParamId::LOW_CUT_SLOPE), Some(3.0));
    }

    #[test]
    fn test_apply_snapshot_all_or_nothing() {
        let store = ParamStore::new();
        let good = ParameterSnapshot {
            peak_freq_hz: 2000.0,
            peak_gain_db: -6.0,
            low_cut_slope: SlopeOrder::Db36,
            ..ParameterSnapshot::default()
        };
        store.apply_snapshot(&good).unwrap();
        assert_eq!(store.get_snapshot(), good);

        let bad = ParameterSnapshot {
            peak_freq_hz: 100.0,
            high_cut_freq_hz: 50000.0,
            ..good
        };
        assert!(store.apply_snapshot(&bad).is_err());
        assert_eq!(store.get_snapshot(), good);
    }

    #[test]
    fn test_reset_to_defaults() {
        let store = ParamStore::new();
        store.set(ParamId::PEAK_GAIN, 12.0).unwrap();
        store.set(ParamId::LOW_CUT_SLOPE, 3.0).unwrap();
        store.reset_to_defaults();
        assert_eq!(store.get_snapshot(), ParameterSnapshot::default());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_concurrent_reads_see_valid_values() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(ParamStore::new());
        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..2000 {
                    let freq = 20.0 + (i % 1000) as f32;
                    store.set(ParamId::PEAK_FREQ, freq).unwrap();
                    store.set(ParamId::LOW_CUT_SLOPE, (i % 4) as f32).unwrap();
                }
            })
        };

        for _ in 0..2000 {
            let snap = store.get_snapshot();
            assert!(snap.validate().is_ok(), "torn field: {snap:?}");
        }
        writer.join().unwrap();
    }
}
