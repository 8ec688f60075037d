//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::detector_config::DetectorConfig;
use crate::error::ConfigError;

/// A named set of detectors and the sample rate they run at.
///
/// Presets are stored as TOML files. They can be loaded from files or
/// strings, created programmatically, and saved to disk.
///
/// # TOML Format
///
/// ```toml
/// name = "Compressor Sidechain"
/// description = "RMS level detector with a rectified program envelope"
/// sample_rate = 48000
///
/// [[detectors]]
/// kind = "rms_db"
/// label = "level"
/// hold_ms = 12.0
///
/// [[detectors]]
/// kind = "envelope"
/// label = "program"
/// rectify = true
/// attack_ms = 5.0
/// release_ms = 120.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectorPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate in Hz (defaults to 48000).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Detectors in the preset.
    #[serde(default)]
    pub detectors: Vec<DetectorConfig>,
}

fn default_sample_rate() -> u32 {
    48000
}

impl DetectorPreset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            detectors: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Add a detector.
    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Add several detectors.
    pub fn with_detectors(mut self, detectors: impl IntoIterator<Item = DetectorConfig>) -> Self {
        self.detectors.extend(detectors);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            name = %preset.name,
            detectors = preset.len(),
            "loaded preset"
        );
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
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
        tracing::info!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of detectors.
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Whether the preset has no detectors.
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Get a detector by index.
    pub fn get(&self, index: usize) -> Option<&DetectorConfig> {
        self.detectors.get(index)
    }

    /// Find a detector by label (or kind identifier, for unlabeled ones).
    pub fn find(&self, label: &str) -> Option<&DetectorConfig> {
        self.detectors.iter().find(|d| d.display_label() == label)
    }

    /// Iterate over detectors.
    pub fn iter(&self) -> impl Iterator<Item = &DetectorConfig> {
        self.detectors.iter()
    }

    /// Labels of all detectors, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.display_label()).collect()
    }
}

impl Default for DetectorPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
