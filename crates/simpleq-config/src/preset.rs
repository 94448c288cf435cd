//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use simpleq_core::{EqError, ParamId, ParameterSnapshot, SlopeOrder};

use crate::error::ConfigError;

/// A named equalizer setting stored as TOML.
///
/// Unlike the state blob, presets are meant to be edited by hand, so slopes
/// are written in dB/oct and every field is optional.
///
/// # TOML Format
///
/// ```toml
/// name = "Rumble Filter"
/// description = "Steep low cut for handling noise"
///
/// [params]
/// low_cut_freq = 80.0
/// low_cut_slope = 48
/// high_cut_freq = 20000.0
/// high_cut_slope = 12
/// peak_freq = 750.0
/// peak_gain = 0.0
/// peak_quality = 1.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values.
    #[serde(default)]
    pub params: PresetParams,
}

/// Parameter section of a preset. Missing fields take the defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresetParams {
    /// Low-cut frequency in Hz.
    pub low_cut_freq: f32,
    /// Low-cut slope in dB/oct (12, 24, 36 or 48).
    pub low_cut_slope: u32,
    /// High-cut frequency in Hz.
    pub high_cut_freq: f32,
    /// High-cut slope in dB/oct.
    pub high_cut_slope: u32,
    /// Peak centre frequency in Hz.
    pub peak_freq: f32,
    /// Peak gain in dB.
    pub peak_gain: f32,
    /// Peak quality.
    pub peak_quality: f32,
}

impl Default for PresetParams {
    fn default() -> Self {
        Self::from(&ParameterSnapshot::default())
    }
}

impl From<&ParameterSnapshot> for PresetParams {
    fn from(snapshot: &ParameterSnapshot) -> Self {
        Self {
            low_cut_freq: snapshot.low_cut_freq_hz,
            low_cut_slope: snapshot.low_cut_slope.db_per_octave(),
            high_cut_freq: snapshot.high_cut_freq_hz,
            high_cut_slope: snapshot.high_cut_slope.db_per_octave(),
            peak_freq: snapshot.peak_freq_hz,
            peak_gain: snapshot.peak_gain_db,
            peak_quality: snapshot.peak_quality,
        }
    }
}

fn slope(id: ParamId, db: u32) -> Result<SlopeOrder, EqError> {
    SlopeOrder::from_db_per_octave(db).ok_or(EqError::InvalidParameter {
        name: id.descriptor().map_or("slope", |d| d.string_id),
        value: db as f32,
        min: 12.0,
        max: 48.0,
    })
}

impl Preset {
    /// Create a preset at default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: PresetParams::default(),
        }
    }

    /// Capture a snapshot as a preset.
    pub fn from_snapshot(name: impl Into<String>, snapshot: &ParameterSnapshot) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: PresetParams::from(snapshot),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Convert to a validated snapshot.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidParameter`] if any value is outside its range or
    /// a slope is not one of 12, 24, 36 or 48.
    pub fn to_snapshot(&self) -> Result<ParameterSnapshot, ConfigError> {
        let p = &self.params;
        let snapshot = ParameterSnapshot {
            low_cut_freq_hz: p.low_cut_freq,
            low_cut_slope: slope(ParamId::LOW_CUT_SLOPE, p.low_cut_slope)?,
            high_cut_freq_hz: p.high_cut_freq,
            high_cut_slope: slope(ParamId::HIGH_CUT_SLOPE, p.high_cut_slope)?,
            peak_freq_hz: p.peak_freq,
            peak_gain_db: p.peak_gain,
            peak_quality: p.peak_quality,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_new_is_default_snapshot() {
        let preset = Preset::new("Init");
        assert_eq!(preset.name, "Init");
        assert!(preset.description.is_none());
        assert_eq!(preset.to_snapshot().unwrap(), ParameterSnapshot::default());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let snap = ParameterSnapshot {
            low_cut_freq_hz: 60.0,
            low_cut_slope: SlopeOrder::Db24,
            peak_gain_db: 3.5,
            ..ParameterSnapshot::default()
        };
        let preset = Preset::from_snapshot("Warm", &snap).with_description("test");
        assert_eq!(preset.params.low_cut_slope, 24);
        assert_eq!(preset.to_snapshot().unwrap(), snap);
    }

    #[test]
    fn test_toml_roundtrip() {
        let preset = Preset::from_snapshot(
            "Bright",
            &ParameterSnapshot {
                high_cut_slope: SlopeOrder::Db36,
                peak_freq_hz: 6000.0,
                peak_gain_db: 2.0,
                ..ParameterSnapshot::default()
            },
        );
        let toml_str = preset.to_toml().unwrap();
        assert!(toml_str.contains("[params]"));
        assert!(toml_str.contains("high_cut_slope = 36"));
        assert_eq!(Preset::from_toml(&toml_str).unwrap(), preset);
    }

    #[test]
    fn test_partial_params_take_defaults() {
        let preset = Preset::from_toml(
            r#"
name = "Only Gain"
[params]
peak_gain = -6.0
"#,
        )
        .unwrap();
        let snap = preset.to_snapshot().unwrap();
        assert_eq!(snap.peak_gain_db, -6.0);
        assert_eq!(snap.peak_freq_hz, 750.0);
        assert_eq!(snap.high_cut_slope, SlopeOrder::Db12);
    }

    #[test]
    fn test_invalid_slope_rejected() {
        let mut preset = Preset::new("Bad");
        preset.params.low_cut_slope = 18;
        assert!(matches!(
            preset.to_snapshot(),
            Err(ConfigError::InvalidParameter(EqError::InvalidParameter {
                name: "low_cut_slope",
                ..
            }))
        ));
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let mut preset = Preset::new("Bad");
        preset.params.peak_gain = 40.0;
        assert!(matches!(
            preset.to_snapshot(),
            Err(ConfigError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Preset::from_toml("name = "),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets").join("mine.toml");
        let preset = Preset::new("Mine").with_description("saved");
        preset.save(&path).unwrap();
        assert_eq!(Preset::load(&path).unwrap(), preset);
    }
}
