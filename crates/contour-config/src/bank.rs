//! Detector bank management.
//!
//! A [`DetectorBank`] runs several detectors side by side on the same input,
//! so one preset can describe, say, a compressor's RMS level detector and a
//! rectified program envelope together. Every detector sees every sample;
//! outputs are looked up by label.
//!
//! # Example
//!
//! ```rust
//! use contour_config::{DetectorBank, DetectorConfig, DetectorPreset};
//!
//! let preset = DetectorPreset::new("Meter")
//!     .with_detector(DetectorConfig::peak(300.0).with_label("peak"))
//!     .with_detector(DetectorConfig::rms_db(50.0).with_label("rms"));
//!
//! let mut bank = DetectorBank::from_preset(&preset).unwrap();
//! for n in 0..4800 {
//!     bank.process((n as f32 * 0.05).sin() * 0.5);
//! }
//! let peak = bank.level("peak").unwrap().to_linear();
//! assert!(peak > 0.45 && peak <= 0.5);
//! ```

use crate::detector::{Detector, DetectorOutput};
use crate::detector_config::DetectorConfig;
use crate::error::ConfigError;
use crate::preset::DetectorPreset;
use crate::validation::{ValidationError, validate_preset, validate_sample_rate};

/// An entry in the bank.
#[derive(Debug, Clone)]
struct BankEntry {
    label: String,
    detector: Detector,
    rectify: bool,
}

/// A set of labeled detectors processed together.
#[derive(Debug, Clone)]
pub struct DetectorBank {
    entries: Vec<BankEntry>,
    /// Last output of each entry, same order as `entries`.
    outputs: Vec<DetectorOutput>,
    sample_rate: u32,
}

impl DetectorBank {
    /// Create an empty bank running at `sample_rate`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Validation`] if the sample rate is out of range.
    pub fn new(sample_rate: u32) -> Result<Self, ConfigError> {
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            entries: Vec::new(),
            outputs: Vec::new(),
            sample_rate,
        })
    }

    /// Build every detector in a preset at the preset's sample rate.
    ///
    /// The whole preset is validated first, so either every detector is
    /// built or none is.
    pub fn from_preset(preset: &DetectorPreset) -> Result<Self, ConfigError> {
        validate_preset(preset)?;

        let mut bank = Self::new(preset.sample_rate)?;
        for config in &preset.detectors {
            bank.add_config(config)?;
        }

        tracing::info!(
            preset = %preset.name,
            detectors = bank.len(),
            sample_rate = bank.sample_rate,
            "built detector bank"
        );
        Ok(bank)
    }

    /// Build a detector from its configuration and add it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Validation`] if the configuration is invalid or its
    /// label is already taken.
    pub fn add_config(&mut self, config: &DetectorConfig) -> Result<(), ConfigError> {
        let detector = Detector::from_config(config, self.sample_rate)?;
        self.push_entry(config.display_label().to_string(), detector, config.rectify)
    }

    /// Add an already built detector under `label`. It sees the input
    /// unrectified.
    pub fn add_detector(
        &mut self,
        label: impl Into<String>,
        detector: Detector,
    ) -> Result<(), ConfigError> {
        self.push_entry(label.into(), detector, false)
    }

    fn push_entry(
        &mut self,
        label: String,
        detector: Detector,
        rectify: bool,
    ) -> Result<(), ConfigError> {
        if self.index_of(&label).is_some() {
            return Err(ValidationError::DuplicateLabel(label).into());
        }
        self.outputs.push(detector.level());
        self.entries.push(BankEntry {
            label,
            detector,
            rectify,
        });
        Ok(())
    }

    /// Feed one sample to every detector and return all outputs, in the
    /// order the detectors were added.
    #[inline]
    pub fn process(&mut self, input: f32) -> &[DetectorOutput] {
        for (entry, out) in self.entries.iter_mut().zip(self.outputs.iter_mut()) {
            let x = if entry.rectify { input.abs() } else { input };
            *out = entry.detector.process(x);
        }
        &self.outputs
    }

    /// Feed a block of samples; returns the outputs after the last one.
    pub fn process_block(&mut self, input: &[f32]) -> &[DetectorOutput] {
        for &sample in input {
            self.process(sample);
        }
        &self.outputs
    }

    /// Last output of the detector labeled `label`.
    pub fn level(&self, label: &str) -> Option<DetectorOutput> {
        self.index_of(label).map(|i| self.outputs[i])
    }

    /// All last outputs, in insertion order.
    pub fn outputs(&self) -> &[DetectorOutput] {
        &self.outputs
    }

    /// The detector labeled `label`.
    pub fn get(&self, label: &str) -> Option<&Detector> {
        self.index_of(label).map(|i| &self.entries[i].detector)
    }

    /// Mutable access to the detector labeled `label`.
    pub fn get_mut(&mut self, label: &str) -> Option<&mut Detector> {
        self.index_of(label).map(move |i| &mut self.entries[i].detector)
    }

    /// Remove and return the detector labeled `label`.
    pub fn remove(&mut self, label: &str) -> Option<Detector> {
        let index = self.index_of(label)?;
        self.outputs.remove(index);
        Some(self.entries.remove(index).detector)
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Iterate over `(label, last output)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DetectorOutput)> {
        self.entries
            .iter()
            .zip(self.outputs.iter())
            .map(|(e, &out)| (e.label.as_str(), out))
    }

    /// Reset every detector to silence.
    pub fn reset(&mut self) {
        for (entry, out) in self.entries.iter_mut().zip(self.outputs.iter_mut()) {
            entry.detector.reset();
            *out = entry.detector.level();
        }
    }

    /// Remove all detectors.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.outputs.clear();
    }

    /// Sample rate the detectors were built for.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of detectors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bank has no detectors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector_config::DetectorKind;

    fn sidechain() -> DetectorPreset {
        DetectorPreset::new("Sidechain")
            .with_detector(DetectorConfig::rms_db(5.0).with_label("level"))
            .with_detector(DetectorConfig::envelope(5.0, 80.0).with_label("gain"))
    }

    #[test]
    fn test_from_preset() {
        let bank = DetectorBank::from_preset(&sidechain()).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.sample_rate(), 48000);
        assert_eq!(bank.labels(), vec!["level", "gain"]);
        assert_eq!(bank.get("gain").map(Detector::kind), Some(DetectorKind::Envelope));
    }

    #[test]
    fn test_invalid_preset_builds_nothing() {
        let preset = sidechain().with_detector(DetectorConfig::fast(-1.0));
        assert!(matches!(
            DetectorBank::from_preset(&preset),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(DetectorBank::new(0).is_err());
        assert!(DetectorBank::new(44100).is_ok());
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut bank = DetectorBank::new(48000).unwrap();
        bank.add_config(&DetectorConfig::peak(50.0)).unwrap();
        let err = bank.add_config(&DetectorConfig::peak(80.0)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation(ValidationError::DuplicateLabel(ref l)) if l == "peak"
        ));
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_process_feeds_every_detector() {
        let mut bank = DetectorBank::new(48000).unwrap();
        bank.add_config(&DetectorConfig::peak(100.0)).unwrap();
        bank.add_config(&DetectorConfig::rms(1.0)).unwrap();

        let outputs = bank.process_block(&[0.5; 480]).to_vec();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0], DetectorOutput::Linear(0.5));
        assert!((outputs[1].to_linear() - 0.5).abs() < 1e-3);
        assert_eq!(bank.level("peak"), Some(outputs[0]));
        assert_eq!(bank.iter().count(), 2);
    }

    #[test]
    fn test_rectified_entry_sees_magnitude() {
        let mut bank = DetectorBank::new(48000).unwrap();
        bank.add_config(&DetectorConfig::envelope(1.0, 1.0).with_label("raw")).unwrap();
        bank.add_config(&DetectorConfig::envelope(1.0, 1.0).rectified().with_label("rectified"))
            .unwrap();

        bank.process_block(&[-0.5; 960]);
        assert!(bank.level("raw").unwrap().to_linear() < -0.49);
        assert!(bank.level("rectified").unwrap().to_linear() > 0.49);
    }

    #[test]
    fn test_remove_and_reset() {
        let mut bank = DetectorBank::from_preset(&sidechain()).unwrap();
        bank.process_block(&[0.8; 256]);
        assert!(bank.level("gain").unwrap().to_linear() > 0.0);

        bank.reset();
        assert_eq!(bank.level("gain"), Some(DetectorOutput::Linear(0.0)));

        assert!(bank.remove("level").is_some());
        assert!(bank.remove("level").is_none());
        assert_eq!(bank.labels(), vec!["gain"]);
        assert_eq!(bank.outputs().len(), 1);

        bank.clear();
        assert!(bank.is_empty());
    }
}
