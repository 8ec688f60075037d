//! Detector configuration types.
//!
//! A [`DetectorConfig`] names one follower kind and its timing in
//! milliseconds. Only the times relevant to the kind are set:
//!
//! | Kind | `attack_ms` | `release_ms` | `hold_ms` |
//! |------|-------------|--------------|-----------|
//! | `envelope` | required | required | - |
//! | `peak` | - | required | - |
//! | `fast`, `smoothed_fast`, `rms`, `rms_db` | - | - | required |
//!
//! Followers see the signal as given. Set `rectify` to feed them `|x|`,
//! which the exponential `envelope` kind needs to track bipolar audio.

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Follower variant selected by a [`DetectorConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    /// [`EnvelopeFollower`](contour_core::EnvelopeFollower): exponential attack and release.
    Envelope,
    /// [`PeakEnvelopeFollower`](contour_core::PeakEnvelopeFollower): instant attack.
    Peak,
    /// [`FastEnvelopeFollower`](contour_core::FastEnvelopeFollower): staircase peak hold.
    Fast,
    /// [`SmoothedFastEnvelopeFollower`](contour_core::SmoothedFastEnvelopeFollower).
    SmoothedFast,
    /// [`FastRmsEnvelopeFollower`](contour_core::FastRmsEnvelopeFollower): linear RMS.
    Rms,
    /// [`FastRmsEnvelopeFollowerDb`](contour_core::FastRmsEnvelopeFollowerDb): RMS in dB.
    RmsDb,
}

impl DetectorKind {
    /// Every kind, in declaration order.
    pub const ALL: [DetectorKind; 6] = [
        DetectorKind::Envelope,
        DetectorKind::Peak,
        DetectorKind::Fast,
        DetectorKind::SmoothedFast,
        DetectorKind::Rms,
        DetectorKind::RmsDb,
    ];

    /// The identifier used in TOML files.
    pub fn as_str(self) -> &'static str {
        match self {
            DetectorKind::Envelope => "envelope",
            DetectorKind::Peak => "peak",
            DetectorKind::Fast => "fast",
            DetectorKind::SmoothedFast => "smoothed_fast",
            DetectorKind::Rms => "rms",
            DetectorKind::RmsDb => "rms_db",
        }
    }

    /// Whether this kind is configured by `attack_ms`.
    pub fn uses_attack(self) -> bool {
        matches!(self, DetectorKind::Envelope)
    }

    /// Whether this kind is configured by `release_ms`.
    pub fn uses_release(self) -> bool {
        matches!(self, DetectorKind::Envelope | DetectorKind::Peak)
    }

    /// Whether this kind is configured by `hold_ms`.
    pub fn uses_hold(self) -> bool {
        !matches!(self, DetectorKind::Envelope | DetectorKind::Peak)
    }

    /// Whether this kind reports its level in decibels.
    pub fn is_decibel(self) -> bool {
        matches!(self, DetectorKind::RmsDb)
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectorKind {
    type Err = ConfigError;

    /// Parse a kind identifier, ignoring case and treating `-` as `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        DetectorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownKind(s.to_string()))
    }
}

/// Configuration for a single detector.
///
/// # TOML Format
///
/// ```toml
/// [[detectors]]
/// kind = "envelope"
/// label = "program"
/// rectify = true
/// attack_ms = 10.0
/// release_ms = 120.0
///
/// [[detectors]]
/// kind = "rms_db"
/// label = "level"
/// hold_ms = 12.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectorConfig {
    /// Follower variant.
    pub kind: DetectorKind,

    /// Name used to look the detector up in a bank. Defaults to the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Feed the follower `|x|` instead of `x`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub rectify: bool,

    /// Attack time in milliseconds (`envelope` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_ms: Option<f32>,

    /// Release time in milliseconds (`envelope` and `peak`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_ms: Option<f32>,

    /// Hold time in milliseconds (fast and RMS kinds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_ms: Option<f32>,
}

impl DetectorConfig {
    /// Create a configuration of the given kind with no times set.
    pub fn new(kind: DetectorKind) -> Self {
        Self {
            kind,
            label: None,
            rectify: false,
            attack_ms: None,
            release_ms: None,
            hold_ms: None,
        }
    }

    /// Exponential attack/release follower.
    pub fn envelope(attack_ms: f32, release_ms: f32) -> Self {
        Self::new(DetectorKind::Envelope)
            .with_attack_ms(attack_ms)
            .with_release_ms(release_ms)
    }

    /// Instant-attack peak follower.
    pub fn peak(release_ms: f32) -> Self {
        Self::new(DetectorKind::Peak).with_release_ms(release_ms)
    }

    /// Staircase fast follower.
    pub fn fast(hold_ms: f32) -> Self {
        Self::new(DetectorKind::Fast).with_hold_ms(hold_ms)
    }

    /// Smoothed fast follower.
    pub fn smoothed_fast(hold_ms: f32) -> Self {
        Self::new(DetectorKind::SmoothedFast).with_hold_ms(hold_ms)
    }

    /// Linear moving-RMS follower.
    pub fn rms(hold_ms: f32) -> Self {
        Self::new(DetectorKind::Rms).with_hold_ms(hold_ms)
    }

    /// Moving-RMS follower reporting dB.
    pub fn rms_db(hold_ms: f32) -> Self {
        Self::new(DetectorKind::RmsDb).with_hold_ms(hold_ms)
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Feed the follower the absolute value of the input.
    pub fn rectified(mut self) -> Self {
        self.rectify = true;
        self
    }

    /// Set the attack time.
    pub fn with_attack_ms(mut self, attack_ms: f32) -> Self {
        self.attack_ms = Some(attack_ms);
        self
    }

    /// Set the release time.
    pub fn with_release_ms(mut self, release_ms: f32) -> Self {
        self.release_ms = Some(release_ms);
        self
    }

    /// Set the hold time.
    pub fn with_hold_ms(mut self, hold_ms: f32) -> Self {
        self.hold_ms = Some(hold_ms);
        self
    }

    /// The label, or the kind identifier when none is set.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.kind.as_str())
    }

    /// Attack time as a [`Duration`], if set.
    pub fn attack(&self) -> Option<Duration> {
        self.attack_ms.map(ms_to_duration)
    }

    /// Release time as a [`Duration`], if set.
    pub fn release(&self) -> Option<Duration> {
        self.release_ms.map(ms_to_duration)
    }

    /// Hold time as a [`Duration`], if set.
    pub fn hold(&self) -> Option<Duration> {
        self.hold_ms.map(ms_to_duration)
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Convert milliseconds to a [`Duration`] rounded to the microsecond.
///
/// Rounding keeps `10.0` ms exactly 10 ms, so hold lengths derived from it
/// do not lose a sample to `f32` representation error. Negative and NaN
/// inputs map to zero.
pub fn ms_to_duration(ms: f32) -> Duration {
    let micros = (f64::from(ms) * 1000.0).round();
    Duration::from_micros(micros as u64)
}
