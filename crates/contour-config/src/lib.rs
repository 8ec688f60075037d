//! Detector configuration and presets for contour envelope followers.
//!
//! This crate describes envelope detectors as data: which follower, with
//! which timing, at which sample rate. Configurations load from and save to
//! TOML, are validated with reasons, and build into runtime detectors.
//!
//! # Features
//!
//! - **Detector configs**: Follower kind plus attack, release, or hold in milliseconds
//! - **Presets**: Named sets of detectors stored as TOML files
//! - **Validation**: Missing or extra times, ranges, holds shorter than a sample
//! - **Runtime detectors**: One [`Detector`] type over every follower, and
//!   [`DetectorBank`] to run several on the same signal
//! - **Factory Presets**: Compressor sidechain, gate, onset, AGC, metering
//!
//! # Example
//!
//! ```rust,no_run
//! use contour_config::{DetectorBank, DetectorConfig, DetectorPreset};
//!
//! // Load a preset from file
//! let preset = DetectorPreset::load("sidechain.toml").unwrap();
//!
//! // Or build one programmatically
//! let preset = DetectorPreset::new("Sidechain")
//!     .with_description("RMS level with a program envelope")
//!     .with_detector(DetectorConfig::rms_db(12.0).with_label("level"))
//!     .with_detector(DetectorConfig::envelope(5.0, 120.0).rectified().with_label("program"));
//! preset.save("presets/sidechain.toml").unwrap();
//!
//! let mut bank = DetectorBank::from_preset(&preset).unwrap();
//! bank.process(0.25);
//! let level_db = bank.level("level").unwrap().to_decibel();
//! ```

mod bank;
mod detector;
mod detector_config;
mod error;
mod preset;

/// Detector and preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use bank::DetectorBank;
pub use detector::{Detector, DetectorOutput};
pub use detector_config::{DetectorConfig, DetectorKind, ms_to_duration};
pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::DetectorPreset;
pub use validation::{
    SAMPLE_RATE_RANGE, TIME_RANGE_MS, ValidationError, ValidationResult, validate_detector,
    validate_preset, validate_sample_rate,
};

/// Re-export the follower types detectors are built from.
pub use contour_core::{Decibel, Follower};
