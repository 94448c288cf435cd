//! State blob codec.
//!
//! The host stores equalizer state as an opaque byte buffer. We fill it with
//! a small JSON document keyed by each parameter's stable string id:
//!
//! ```json
//! {
//!   "format": "simpleq-state",
//!   "version": 1,
//!   "params": {
//!     "high_cut_freq": 20000.0,
//!     "high_cut_slope": 0.0,
//!     "low_cut_freq": 20.0,
//!     "low_cut_slope": 0.0,
//!     "peak_freq": 750.0,
//!     "peak_gain": 0.0,
//!     "peak_quality": 1.0
//!   }
//! }
//! ```
//!
//! Slopes are stored as their choice index (0..=3). Stable keys, not
//! positions, so reordering parameters never breaks saved sessions.
//!
//! Decoding is lenient about what it does not know and strict about what it
//! does: unknown keys are skipped, missing keys fall back to defaults, but a
//! known key with a bad value fails the whole blob. Bare objects without the
//! `format` wrapper are read as a flat parameter map; numeric keys are read as
//! [`ParamId`] values.

use serde_json::{Map, Value};
use simpleq_core::{ParamId, ParameterSnapshot};

use crate::error::ConfigError;

/// Value of the `format` field.
pub const STATE_FORMAT: &str = "simpleq-state";

/// Current layout version.
pub const STATE_VERSION: u64 = 1;

/// Encode a snapshot as a state blob.
pub fn serialize(snapshot: &ParameterSnapshot) -> Result<Vec<u8>, ConfigError> {
    let mut params = Map::new();
    for id in ParamId::ALL {
        let (Some(desc), Some(value)) = (id.descriptor(), snapshot.get(id)) else {
            continue;
        };
        params.insert(desc.string_id.to_string(), Value::from(f64::from(value)));
    }

    let mut root = Map::new();
    root.insert("format".to_string(), Value::from(STATE_FORMAT));
    root.insert("version".to_string(), Value::from(STATE_VERSION));
    root.insert("params".to_string(), Value::Object(params));

    Ok(serde_json::to_vec(&Value::Object(root))?)
}

/// Decode a state blob.
///
/// # Errors
///
/// [`ConfigError::CorruptState`] if the blob is not a JSON object, carries a
/// foreign `format`, has a non-object `params`, or holds a known parameter
/// whose value is not a number in range.
pub fn deserialize(bytes: &[u8]) -> Result<ParameterSnapshot, ConfigError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ConfigError::corrupt(format!("invalid state JSON: {e}")))?;

    let Value::Object(root) = value else {
        return Err(ConfigError::corrupt("state is not a JSON object"));
    };

    let params = match root.get("format") {
        Some(Value::String(format)) if format == STATE_FORMAT => {
            check_version(root.get("version"))?;
            match root.get("params") {
                Some(Value::Object(params)) => params,
                Some(_) => return Err(ConfigError::corrupt("'params' is not an object")),
                None => return Ok(ParameterSnapshot::default()),
            }
        }
        Some(other) => {
            return Err(ConfigError::corrupt(format!("unknown state format {other}")));
        }
        None => match root.get("params") {
            Some(Value::Object(params)) => params,
            _ => &root,
        },
    };

    decode_params(params)
}

fn check_version(version: Option<&Value>) -> Result<(), ConfigError> {
    match version {
        None => Ok(()),
        Some(v) => match v.as_u64() {
            Some(n) if n >= 1 => {
                if n > STATE_VERSION {
                    tracing::debug!(version = n, "reading state written by a newer version");
                }
                Ok(())
            }
            _ => Err(ConfigError::corrupt(format!("invalid state version {v}"))),
        },
    }
}

fn resolve_key(key: &str) -> Option<ParamId> {
    match key.parse::<u32>() {
        Ok(raw) => Some(ParamId(raw)).filter(|id| id.descriptor().is_some()),
        Err(_) => ParamId::from_name(key),
    }
}

fn decode_params(params: &Map<String, Value>) -> Result<ParameterSnapshot, ConfigError> {
    let mut snapshot = ParameterSnapshot::default();

    for (key, value) in params {
        let Some(id) = resolve_key(key) else {
            tracing::debug!(key = %key, "skipping unknown state key");
            continue;
        };
        let Some(raw) = value.as_f64() else {
            return Err(ConfigError::corrupt(format!(
                "parameter '{key}' is not a number: {value}"
            )));
        };
        snapshot = snapshot
            .with(id, raw as f32)
            .map_err(|e| ConfigError::corrupt(e.to_string()))?;
    }

    Ok(snapshot)
}
