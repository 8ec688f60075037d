//! Factory presets bundled with the library.
//!
//! Built-in detector setups for common dynamics and analysis jobs. They are
//! always available without external files and serve as starting points.

use crate::DetectorPreset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "compressor_sidechain",
    "gate",
    "onset",
    "agc",
    "meter",
];

/// TOML content for factory presets.
///
/// These are embedded at compile time and always available.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("compressor_sidechain", COMPRESSOR_SIDECHAIN_PRESET),
    ("gate", GATE_PRESET),
    ("onset", ONSET_PRESET),
    ("agc", AGC_PRESET),
    ("meter", METER_PRESET),
];

/// Initialization preset - one general-purpose envelope.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Single rectified envelope follower with 10 ms attack and 100 ms release"
sample_rate = 48000

[[detectors]]
kind = "envelope"
rectify = true
attack_ms = 10.0
release_ms = 100.0
"#;

/// Compressor sidechain - RMS level in dB plus a program envelope.
const COMPRESSOR_SIDECHAIN_PRESET: &str = r#"
name = "Compressor Sidechain"
description = "Moving RMS in dB for the level, rectified attack/release envelope for the program"
sample_rate = 48000

[[detectors]]
kind = "rms_db"
label = "level"
hold_ms = 12.0

[[detectors]]
kind = "envelope"
label = "program"
rectify = true
attack_ms = 5.0
release_ms = 120.0
"#;

/// Gate - instant-attack key detector.
const GATE_PRESET: &str = r#"
name = "Gate"
description = "Instant-attack peak key with a short release for noise gating"
sample_rate = 48000

[[detectors]]
kind = "peak"
label = "key"
release_ms = 50.0

[[detectors]]
kind = "rms_db"
label = "level"
hold_ms = 6.0
"#;

/// Onset detector - staircase against its smoothed version.
const ONSET_PRESET: &str = r#"
name = "Onset"
description = "Zero-latency staircase and smoothed envelope for onset detection down to E1"
sample_rate = 48000

[[detectors]]
kind = "fast"
label = "staircase"
hold_ms = 12.5

[[detectors]]
kind = "smoothed_fast"
label = "smoothed"
hold_ms = 12.5
"#;

/// Automatic gain control - slow RMS and a slower long-term envelope.
const AGC_PRESET: &str = r#"
name = "AGC"
description = "Slow moving RMS with a gentle long-term envelope for automatic gain control"
sample_rate = 48000

[[detectors]]
kind = "rms"
label = "level"
hold_ms = 50.0

[[detectors]]
kind = "envelope"
label = "long_term"
rectify = true
attack_ms = 300.0
release_ms = 1500.0
"#;

/// Meter - peak hold with RMS in dB.
const METER_PRESET: &str = r#"
name = "Meter"
description = "Peak with 300 ms fall-back and 50 ms RMS in dB for level metering"
sample_rate = 48000

[[detectors]]
kind = "peak"
label = "peak"
release_ms = 300.0

[[detectors]]
kind = "rms_db"
label = "rms"
hold_ms = 50.0
"#;

/// Get all factory presets.
///
/// Presets that fail to parse are skipped.
///
/// # Example
///
/// ```rust
/// use contour_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {} detectors", preset.name, preset.len());
/// }
/// ```
pub fn factory_presets() -> Vec<DetectorPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| DetectorPreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal name or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use contour_config::get_factory_preset;
///
/// let preset = get_factory_preset("gate").expect("gate preset");
/// assert_eq!(preset.name, "Gate");
/// ```
pub fn get_factory_preset(name: &str) -> Option<DetectorPreset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return DetectorPreset::from_toml(toml).ok();
        }
    }

    // Also try matching against the preset's actual name field
    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Get the names of all factory presets.
///
/// # Example
///
/// ```rust
/// use contour_config::factory_presets::factory_preset_names;
///
/// let names = factory_preset_names();
/// assert!(names.contains(&"onset"));
/// ```
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a preset name is a factory preset (case-insensitive, internal
/// or display name).
///
/// # Example
///
/// ```rust
/// use contour_config::is_factory_preset;
///
/// assert!(is_factory_preset("agc"));
/// assert!(is_factory_preset("Compressor Sidechain"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
