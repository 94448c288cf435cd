//! Persistence and presets for the simpleq equalizer.
//!
//! - **State codec**: [`serialize`] / [`deserialize`] the opaque blob a host
//!   stores with a session
//! - **[`StateManager`]**: single in-flight save/load against a live
//!   [`ParamStore`](simpleq_core::ParamStore)
//! - **Presets**: hand-editable TOML files plus bundled factory presets
//! - **Paths**: platform config and preset directories
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use simpleq_config::{StateManager, get_factory_preset};
//! use simpleq_core::ParamStore;
//!
//! let store = Arc::new(ParamStore::new());
//! let state = StateManager::new(Arc::clone(&store));
//!
//! let preset = get_factory_preset("vocal_presence").unwrap();
//! state.apply_preset(&preset).unwrap();
//! assert_eq!(store.get_snapshot().peak_freq_hz, 3000.0);
//!
//! let blob = state.save().unwrap();
//! assert!(simpleq_config::deserialize(&blob).is_ok());
//! ```

mod error;
mod preset;
mod state;

/// State blob encoding.
pub mod codec;

/// Platform-specific paths for presets and state.
pub mod paths;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use codec::{STATE_FORMAT, STATE_VERSION, deserialize, serialize};
pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use paths::{
    default_state_path, ensure_user_presets_dir, find_preset, list_user_presets,
    preset_name_from_path, user_config_dir, user_presets_dir,
};
pub use preset::{Preset, PresetParams};
pub use state::StateManager;
