//! Runtime detectors built from configuration.
//!
//! [`Detector`] wraps every follower variant behind one type, so a detector
//! chosen at runtime (from a preset file, a UI menu) can be driven without
//! generics. Each variant keeps its follower by value; dispatch is a `match`
//! per sample.

use contour_core::{
    Decibel, EnvelopeFollower, FastEnvelopeFollower, FastRmsEnvelopeFollower,
    FastRmsEnvelopeFollowerDb, Follower, PeakEnvelopeFollower, SmoothedFastEnvelopeFollower,
};

use crate::detector_config::{DetectorConfig, DetectorKind};
use crate::error::ConfigError;
use crate::validation::{ValidationError, validate_detector};

/// Output of a [`Detector`], in the domain its follower reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectorOutput {
    /// Linear magnitude.
    Linear(f32),
    /// Level in decibels.
    Decibel(Decibel),
}

impl DetectorOutput {
    /// The level as a linear magnitude.
    pub fn to_linear(self) -> f32 {
        match self {
            DetectorOutput::Linear(v) => v,
            DetectorOutput::Decibel(db) => db.to_linear(),
        }
    }

    /// The level in decibels. Zero maps to the floor of
    /// [`Decibel::from_linear`].
    pub fn to_decibel(self) -> Decibel {
        match self {
            DetectorOutput::Linear(v) => Decibel::from_linear(v),
            DetectorOutput::Decibel(db) => db,
        }
    }
}

/// A follower of any kind, selected at runtime.
#[derive(Debug, Clone)]
pub enum Detector {
    /// Exponential attack and release.
    Envelope(EnvelopeFollower),
    /// Instant attack, exponential release.
    Peak(PeakEnvelopeFollower),
    /// Staircase peak hold.
    Fast(FastEnvelopeFollower),
    /// Staircase smoothed by a moving average.
    SmoothedFast(SmoothedFastEnvelopeFollower),
    /// Moving RMS, linear.
    Rms(FastRmsEnvelopeFollower),
    /// Moving RMS in dB.
    RmsDb(FastRmsEnvelopeFollowerDb),
}

impl Detector {
    /// Build a detector from its configuration at `sample_rate`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Validation`] if the configuration is missing a time,
    /// carries one its kind does not use, or has a time out of range.
    pub fn from_config(config: &DetectorConfig, sample_rate: u32) -> Result<Self, ConfigError> {
        validate_detector(config, sample_rate)?;
        let sr = sample_rate as f32;
        let missing = |param: &'static str| {
            ConfigError::Validation(ValidationError::MissingParameter {
                kind: config.kind,
                param,
            })
        };

        let hold = || config.hold().ok_or_else(|| missing("hold_ms"));

        let detector = match config.kind {
            DetectorKind::Envelope => {
                let attack = config.attack().ok_or_else(|| missing("attack_ms"))?;
                let release = config.release().ok_or_else(|| missing("release_ms"))?;
                Detector::Envelope(EnvelopeFollower::try_new(attack, release, sr)?)
            }
            DetectorKind::Peak => {
                let release = config.release().ok_or_else(|| missing("release_ms"))?;
                Detector::Peak(PeakEnvelopeFollower::try_new(release, sr)?)
            }
            DetectorKind::Fast => Detector::Fast(FastEnvelopeFollower::try_new(hold()?, sr)?),
            DetectorKind::SmoothedFast => {
                Detector::SmoothedFast(SmoothedFastEnvelopeFollower::try_new(hold()?, sr)?)
            }
            DetectorKind::Rms => Detector::Rms(FastRmsEnvelopeFollower::try_new(hold()?, sr)?),
            DetectorKind::RmsDb => {
                Detector::RmsDb(FastRmsEnvelopeFollowerDb::try_new(hold()?, sr)?)
            }
        };

        tracing::debug!(
            label = config.display_label(),
            kind = %config.kind,
            sample_rate,
            "built detector"
        );
        Ok(detector)
    }

    /// Which kind of follower this is.
    pub fn kind(&self) -> DetectorKind {
        match self {
            Detector::Envelope(_) => DetectorKind::Envelope,
            Detector::Peak(_) => DetectorKind::Peak,
            Detector::Fast(_) => DetectorKind::Fast,
            Detector::SmoothedFast(_) => DetectorKind::SmoothedFast,
            Detector::Rms(_) => DetectorKind::Rms,
            Detector::RmsDb(_) => DetectorKind::RmsDb,
        }
    }

    /// Process a sample and return the new level.
    #[inline]
    pub fn process(&mut self, input: f32) -> DetectorOutput {
        match self {
            Detector::Envelope(f) => DetectorOutput::Linear(f.process(input)),
            Detector::Peak(f) => DetectorOutput::Linear(f.process(input)),
            Detector::Fast(f) => DetectorOutput::Linear(f.process(input)),
            Detector::SmoothedFast(f) => DetectorOutput::Linear(f.process(input)),
            Detector::Rms(f) => DetectorOutput::Linear(f.process(input)),
            Detector::RmsDb(f) => DetectorOutput::Decibel(f.process(input)),
        }
    }

    /// Last level without processing new input.
    #[inline]
    pub fn level(&self) -> DetectorOutput {
        match self {
            Detector::Envelope(f) => DetectorOutput::Linear(f.level()),
            Detector::Peak(f) => DetectorOutput::Linear(f.level()),
            Detector::Fast(f) => DetectorOutput::Linear(f.level()),
            Detector::SmoothedFast(f) => DetectorOutput::Linear(f.level()),
            Detector::Rms(f) => DetectorOutput::Linear(f.level()),
            Detector::RmsDb(f) => DetectorOutput::Decibel(f.level()),
        }
    }

    /// Reset the wrapped follower to silence.
    pub fn reset(&mut self) {
        match self {
            Detector::Envelope(f) => f.reset(),
            Detector::Peak(f) => f.reset(),
            Detector::Fast(f) => f.reset(),
            Detector::SmoothedFast(f) => f.reset(),
            Detector::Rms(f) => f.reset(),
            Detector::RmsDb(f) => f.reset(),
        }
    }
}

impl Follower for Detector {
    type Output = DetectorOutput;

    fn process(&mut self, input: f32) -> DetectorOutput {
        Detector::process(self, input)
    }

    fn level(&self) -> DetectorOutput {
        Detector::level(self)
    }

    fn reset(&mut self) {
        Detector::reset(self);
    }
}
