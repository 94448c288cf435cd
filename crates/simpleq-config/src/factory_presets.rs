//! Factory presets bundled with the simpleq library.
//!
//! Always available without external files; starting points for common
//! cleanup and tone-shaping jobs.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "flat",
    "rumble_filter",
    "vocal_presence",
    "telephone",
    "mud_cut",
    "de_harsh",
];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("flat", FLAT_PRESET),
    ("rumble_filter", RUMBLE_FILTER_PRESET),
    ("vocal_presence", VOCAL_PRESENCE_PRESET),
    ("telephone", TELEPHONE_PRESET),
    ("mud_cut", MUD_CUT_PRESET),
    ("de_harsh", DE_HARSH_PRESET),
];

/// Flat - every band at its neutral setting.
const FLAT_PRESET: &str = r#"
name = "Flat"
description = "Neutral settings: gentle cuts at the band edges, no peak gain"

[params]
low_cut_freq = 20.0
low_cut_slope = 12
high_cut_freq = 20000.0
high_cut_slope = 12
peak_freq = 750.0
peak_gain = 0.0
peak_quality = 1.0
"#;

/// Rumble filter - steep subsonic cut.
const RUMBLE_FILTER_PRESET: &str = r#"
name = "Rumble Filter"
description = "Steep low cut for stage rumble and handling noise"

[params]
low_cut_freq = 80.0
low_cut_slope = 48
high_cut_freq = 20000.0
high_cut_slope = 12
peak_freq = 750.0
peak_gain = 0.0
peak_quality = 1.0
"#;

/// Vocal presence - broad lift in the intelligibility range.
const VOCAL_PRESENCE_PRESET: &str = r#"
name = "Vocal Presence"
description = "Low cut with a broad presence lift around 3 kHz"

[params]
low_cut_freq = 100.0
low_cut_slope = 24
high_cut_freq = 18000.0
high_cut_slope = 12
peak_freq = 3000.0
peak_gain = 4.0
peak_quality = 0.8
"#;

/// Telephone - narrow band-limited voice.
const TELEPHONE_PRESET: &str = r#"
name = "Telephone"
description = "Band-limited 300 Hz - 3.4 kHz voice with a nasal bump"

[params]
low_cut_freq = 300.0
low_cut_slope = 48
high_cut_freq = 3400.0
high_cut_slope = 48
peak_freq = 1500.0
peak_gain = 6.0
peak_quality = 1.5
"#;

/// Mud cut - dip the low mids.
const MUD_CUT_PRESET: &str = r#"
name = "Mud Cut"
description = "Narrow dip in the boxy low-mid region"

[params]
low_cut_freq = 40.0
low_cut_slope = 24
high_cut_freq = 20000.0
high_cut_slope = 12
peak_freq = 350.0
peak_gain = -6.0
peak_quality = 2.0
"#;

/// De-harsh - tame the upper mids and the top end.
const DE_HARSH_PRESET: &str = r#"
name = "De-Harsh"
description = "Soft high cut and a gentle dip at 4 kHz"

[params]
low_cut_freq = 20.0
low_cut_slope = 12
high_cut_freq = 12000.0
high_cut_slope = 12
peak_freq = 4000.0
peak_gain = -3.5
peak_quality = 1.2
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use simpleq_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by key or display name, case-insensitive.
///
/// ```rust
/// use simpleq_config::get_factory_preset;
///
/// assert!(get_factory_preset("rumble_filter").is_some());
/// assert!(get_factory_preset("Vocal Presence").is_some());
/// assert!(get_factory_preset("nope").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(&name_lower))
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Whether `name` names a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
