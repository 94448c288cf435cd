//! Shared CLI helpers used across multiple commands.

use clap::Args;
use simpleq_config::{Preset, StateManager, find_preset, get_factory_preset};
use simpleq_core::{ParamId, ParamStore, SlopeOrder};
use std::path::PathBuf;
use std::sync::Arc;

/// Equalizer settings shared by every command that builds a store.
///
/// Sources are layered: preset first, then a saved state blob, then the
/// individual flags on top.
#[derive(Args, Debug, Default)]
pub struct EqArgs {
    /// Start from a preset (factory name, user preset name or TOML path)
    #[arg(short, long, value_name = "PRESET")]
    pub preset: Option<String>,

    /// Start from a saved state blob
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Low-cut frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub low_cut: Option<f32>,

    /// Low-cut slope in dB/oct (12, 24, 36, 48)
    #[arg(long, value_name = "DB", value_parser = parse_slope)]
    pub low_cut_slope: Option<SlopeOrder>,

    /// High-cut frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub high_cut: Option<f32>,

    /// High-cut slope in dB/oct (12, 24, 36, 48)
    #[arg(long, value_name = "DB", value_parser = parse_slope)]
    pub high_cut_slope: Option<SlopeOrder>,

    /// Peak centre frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub peak_freq: Option<f32>,

    /// Peak gain in dB
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub peak_gain: Option<f32>,

    /// Peak quality
    #[arg(long, value_name = "Q")]
    pub peak_q: Option<f32>,
}

impl EqArgs {
    /// Apply the layered settings to `store`.
    pub fn apply(&self, store: &Arc<ParamStore>) -> anyhow::Result<()> {
        let manager = StateManager::new(Arc::clone(store));

        if let Some(name) = &self.preset {
            let preset = load_preset(name)?;
            tracing::debug!(preset = %preset.name, "applying preset");
            manager.apply_preset(&preset)?;
        }

        if let Some(path) = &self.state {
            manager.load_from_file(path)?;
        }

        let values = [
            (ParamId::LOW_CUT_FREQ, self.low_cut),
            (ParamId::HIGH_CUT_FREQ, self.high_cut),
            (ParamId::PEAK_FREQ, self.peak_freq),
            (ParamId::PEAK_GAIN, self.peak_gain),
            (ParamId::PEAK_QUALITY, self.peak_q),
        ];
        for (id, value) in values
            .into_iter()
            .filter_map(|(id, value)| value.map(|v| (id, v)))
        {
            store.set(id, value)?;
        }

        if let Some(slope) = self.low_cut_slope {
            store.set_low_cut_slope(slope);
        }
        if let Some(slope) = self.high_cut_slope {
            store.set_high_cut_slope(slope);
        }

        Ok(())
    }

    /// Build a fresh store from these settings.
    pub fn build_store(&self) -> anyhow::Result<Arc<ParamStore>> {
        let store = Arc::new(ParamStore::new());
        self.apply(&store)?;
        Ok(store)
    }
}

/// Parse a slope given in dB/oct, with or without a `db` suffix.
pub fn parse_slope(s: &str) -> Result<SlopeOrder, String> {
    let trimmed = s.trim().to_ascii_lowercase();
    let digits = trimmed
        .strip_suffix("db/oct")
        .or_else(|| trimmed.strip_suffix("db"))
        .unwrap_or(&trimmed)
        .trim();
    digits
        .parse::<u32>()
        .ok()
        .and_then(SlopeOrder::from_db_per_octave)
        .ok_or_else(|| format!("invalid slope '{s}' (expected 12, 24, 36 or 48)"))
}

/// Load a preset by name or path.
///
/// Searches factory presets first, then the user preset directory, then
/// treats the argument as a file path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = find_preset(name) {
        return Ok(Preset::load(&path)?);
    }

    anyhow::bail!("Preset '{name}' not found. Use 'simpleq presets list' to see available presets.")
}
