//! Control-side persistence against a live parameter store.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use simpleq_core::{ParamStore, ParameterSnapshot};

use crate::codec;
use crate::error::ConfigError;
use crate::preset::Preset;

/// Saves and restores the parameters of a running equalizer.
///
/// Only one save or load runs at a time. A load decodes the whole blob before
/// touching the store, and the store itself validates every field before
/// committing, so a bad blob leaves the live parameters exactly as they were.
/// The audio thread keeps processing throughout; it never takes this lock.
///
/// ```rust
/// use std::sync::Arc;
/// use simpleq_config::StateManager;
/// use simpleq_core::{ParamId, ParamStore};
///
/// let store = Arc::new(ParamStore::new());
/// let state = StateManager::new(Arc::clone(&store));
///
/// store.set(ParamId::PEAK_GAIN, 4.5).unwrap();
/// let blob = state.save().unwrap();
///
/// store.reset_to_defaults();
/// state.load(&blob).unwrap();
/// assert_eq!(store.get(ParamId::PEAK_GAIN), Some(4.5));
///
/// assert!(state.load(b"garbage").is_err());
/// assert_eq!(store.get(ParamId::PEAK_GAIN), Some(4.5));
/// ```
#[derive(Debug)]
pub struct StateManager {
    store: Arc<ParamStore>,
    in_flight: Mutex<()>,
}

impl StateManager {
    /// Manage persistence for `store`.
    pub fn new(store: Arc<ParamStore>) -> Self {
        Self {
            store,
            in_flight: Mutex::new(()),
        }
    }

    /// The store being persisted.
    pub fn store(&self) -> &Arc<ParamStore> {
        &self.store
    }

    /// Encode the current parameters.
    pub fn save(&self) -> Result<Vec<u8>, ConfigError> {
        let _guard = self.in_flight.lock();
        codec::serialize(&self.store.get_snapshot())
    }

    /// Decode `bytes` and replace the current parameters with it.
    ///
    /// On failure the store is untouched, a warning is logged, and the error
    /// is returned. Returns the snapshot that was applied.
    pub fn load(&self, bytes: &[u8]) -> Result<ParameterSnapshot, ConfigError> {
        let _guard = self.in_flight.lock();
        let result = codec::deserialize(bytes).and_then(|snapshot| {
            self.store.apply_snapshot(&snapshot)?;
            Ok(snapshot)
        });
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "rejected saved state; keeping current parameters");
        }
        result
    }

    /// Apply a preset's parameters.
    pub fn apply_preset(&self, preset: &Preset) -> Result<ParameterSnapshot, ConfigError> {
        let _guard = self.in_flight.lock();
        let snapshot = preset.to_snapshot()?;
        self.store.apply_snapshot(&snapshot)?;
        tracing::info!(preset = %preset.name, "preset applied");
        Ok(snapshot)
    }

    /// Write the current parameters to a state file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let bytes = self.save()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        std::fs::write(path, bytes).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Read a state file and apply it.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<ParameterSnapshot, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ConfigError::read_file(path, e))?;
        self.load(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpleq_core::{ParamId, SlopeOrder};

    fn manager() -> (Arc<ParamStore>, StateManager) {
        let store = Arc::new(ParamStore::new());
        let state = StateManager::new(Arc::clone(&store));
        (store, state)
    }

    #[test]
    fn save_load_restores_all_parameters() {
        let (store, state) = manager();
        store.set(ParamId::LOW_CUT_FREQ, 95.0).unwrap();
        store.set_high_cut_slope(SlopeOrder::Db48);
        store.set(ParamId::PEAK_QUALITY, -0.1).unwrap();
        let saved = store.get_snapshot();

        let blob = state.save().unwrap();
        store.reset_to_defaults();
        assert_eq!(state.load(&blob).unwrap(), saved);
        assert_eq!(store.get_snapshot(), saved);
    }

    #[test]
    fn corrupt_blob_leaves_store_untouched() {
        let (store, state) = manager();
        store.set(ParamId::PEAK_FREQ, 3000.0).unwrap();
        let before = store.get_snapshot();

        let blobs: [&[u8]; 3] = [b"{not json", br#"{"params":{"peak_freq":-5}}"#, b"42"];
        for blob in blobs {
            assert!(matches!(state.load(blob), Err(ConfigError::CorruptState(_))));
            assert_eq!(store.get_snapshot(), before);
        }
    }

    #[test]
    fn missing_file_is_read_error() {
        let (_store, state) = manager();
        let err = state
            .load_from_file("/nonexistent/simpleq/state.json")
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let (store, state) = manager();
        store.set(ParamId::PEAK_GAIN, -12.0).unwrap();
        state.save_to_file(&path).unwrap();

        store.reset_to_defaults();
        state.load_from_file(&path).unwrap();
        assert_eq!(store.get(ParamId::PEAK_GAIN), Some(-12.0));
    }
}
