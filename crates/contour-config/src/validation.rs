//! Detector and preset validation.
//!
//! Checks that each detector carries exactly the times its kind needs, that
//! every time is inside [`TIME_RANGE_MS`], and that hold times span at least
//! one sample at the preset's sample rate.
//!
//! # Example
//!
//! ```rust
//! use contour_config::{DetectorConfig, ValidationError, validate_detector};
//!
//! validate_detector(&DetectorConfig::rms_db(12.0), 48000).expect("valid detector");
//!
//! let err = validate_detector(&DetectorConfig::peak(0.0), 48000).unwrap_err();
//! assert!(matches!(err, ValidationError::OutOfRange { .. }));
//! ```

use contour_core::hold_samples;
use thiserror::Error;

use crate::detector_config::{DetectorConfig, DetectorKind};
use crate::preset::DetectorPreset;

/// Accepted range for attack, release, and hold times, in milliseconds.
pub const TIME_RANGE_MS: (f32, f32) = (0.01, 60_000.0);

/// Accepted range for preset sample rates, in Hz.
pub const SAMPLE_RATE_RANGE: (u32, u32) = (8_000, 768_000);

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A time the kind needs is not set.
    #[error("{kind} detector requires '{param}'")]
    MissingParameter {
        /// Detector kind.
        kind: DetectorKind,
        /// Name of the missing field.
        param: &'static str,
    },

    /// A time is set that the kind does not use.
    #[error("{kind} detector does not use '{param}'")]
    UnusedParameter {
        /// Detector kind.
        kind: DetectorKind,
        /// Name of the extra field.
        param: &'static str,
    },

    /// Time value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: &'static str,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Hold shorter than one sample at the sample rate.
    #[error("hold of {hold_ms} ms is shorter than one sample at {sample_rate} Hz")]
    HoldTooShort {
        /// Hold time in milliseconds.
        hold_ms: f32,
        /// Sample rate in Hz.
        sample_rate: u32,
    },

    /// Sample rate outside [`SAMPLE_RATE_RANGE`].
    #[error("sample rate {0} Hz out of range")]
    InvalidSampleRate(u32),

    /// Two detectors in one preset share a label.
    #[error("duplicate detector label '{0}'")]
    DuplicateLabel(String),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a sample rate.
pub fn validate_sample_rate(sample_rate: u32) -> ValidationResult<()> {
    if (SAMPLE_RATE_RANGE.0..=SAMPLE_RATE_RANGE.1).contains(&sample_rate) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSampleRate(sample_rate))
    }
}

/// Validate one detector at `sample_rate`, reporting the first problem.
pub fn validate_detector(config: &DetectorConfig, sample_rate: u32) -> ValidationResult<()> {
    let mut errors = detector_errors(config, sample_rate);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.swap_remove(0))
    }
}

/// Validate a whole preset, collecting every problem.
///
/// Returns the single error directly when there is only one, otherwise
/// [`ValidationError::Multiple`].
pub fn validate_preset(preset: &DetectorPreset) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if let Err(e) = validate_sample_rate(preset.sample_rate) {
        errors.push(e);
    }

    let mut seen: Vec<&str> = Vec::with_capacity(preset.detectors.len());
    for config in &preset.detectors {
        let label = config.display_label();
        if seen.contains(&label) {
            errors.push(ValidationError::DuplicateLabel(label.to_string()));
        } else {
            seen.push(label);
        }
        errors.extend(detector_errors(config, preset.sample_rate));
    }

    if errors.is_empty() {
        return Ok(());
    }

    tracing::warn!(
        preset = %preset.name,
        count = errors.len(),
        "preset failed validation"
    );
    if errors.len() == 1 {
        Err(errors.swap_remove(0))
    } else {
        Err(ValidationError::Multiple(errors))
    }
}

fn detector_errors(config: &DetectorConfig, sample_rate: u32) -> Vec<ValidationError> {
    let kind = config.kind;
    let mut errors = Vec::new();

    let fields = [
        ("attack_ms", config.attack_ms, kind.uses_attack()),
        ("release_ms", config.release_ms, kind.uses_release()),
        ("hold_ms", config.hold_ms, kind.uses_hold()),
    ];
    for (param, value, used) in fields {
        match (value, used) {
            (None, true) => errors.push(ValidationError::MissingParameter { kind, param }),
            (Some(_), false) => errors.push(ValidationError::UnusedParameter { kind, param }),
            (Some(value), true) => {
                if let Err(e) = check_time(param, value) {
                    errors.push(e);
                }
            }
            (None, false) => {}
        }
    }

    if let (Some(hold_ms), Some(hold)) = (config.hold_ms, config.hold())
        && errors.is_empty()
        && hold_samples(hold, sample_rate as f32) == 0
    {
        errors.push(ValidationError::HoldTooShort {
            hold_ms,
            sample_rate,
        });
    }

    errors
}

fn check_time(param: &'static str, value: f32) -> ValidationResult<()> {
    let (min, max) = TIME_RANGE_MS;
    // NaN fails both comparisons
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_detectors() {
        for config in [
            DetectorConfig::envelope(10.0, 100.0),
            DetectorConfig::peak(50.0),
            DetectorConfig::fast(6.0),
            DetectorConfig::smoothed_fast(6.0),
            DetectorConfig::rms(12.0),
            DetectorConfig::rms_db(12.0),
        ] {
            assert!(
                validate_detector(&config, 48000).is_ok(),
                "{config:?} should be valid"
            );
        }
    }

    #[test]
    fn test_missing_parameter() {
        let config = DetectorConfig::new(DetectorKind::Envelope).with_attack_ms(5.0);
        assert_eq!(
            validate_detector(&config, 48000),
            Err(ValidationError::MissingParameter {
                kind: DetectorKind::Envelope,
                param: "release_ms",
            })
        );
    }

    #[test]
    fn test_unused_parameter() {
        let config = DetectorConfig::fast(5.0).with_release_ms(100.0);
        assert_eq!(
            validate_detector(&config, 48000),
            Err(ValidationError::UnusedParameter {
                kind: DetectorKind::Fast,
                param: "release_ms",
            })
        );
    }

    #[test]
    fn test_out_of_range() {
        for bad in [0.0, -5.0, 1e6, f32::NAN, f32::INFINITY] {
            let err = validate_detector(&DetectorConfig::peak(bad), 48000).unwrap_err();
            assert!(
                matches!(err, ValidationError::OutOfRange { param: "release_ms", .. }),
                "{bad} should be out of range, got {err:?}"
            );
        }
    }

    #[test]
    fn test_hold_too_short() {
        // 0.05 ms at 8 kHz is 0.4 samples
        let err = validate_detector(&DetectorConfig::rms(0.05), 8000).unwrap_err();
        assert_eq!(
            err,
            ValidationError::HoldTooShort {
                hold_ms: 0.05,
                sample_rate: 8000,
            }
        );
        // Same hold at 48 kHz is 2.4 samples
        assert!(validate_detector(&DetectorConfig::rms(0.05), 48000).is_ok());
    }

    #[test]
    fn test_sample_rate_range() {
        assert!(validate_sample_rate(44100).is_ok());
        assert!(validate_sample_rate(192_000).is_ok());
        assert_eq!(
            validate_sample_rate(0),
            Err(ValidationError::InvalidSampleRate(0))
        );
        assert!(validate_sample_rate(1_000_000).is_err());
    }

    #[test]
    fn test_preset_collects_all_errors() {
        let preset = DetectorPreset::new("Broken")
            .with_sample_rate(0)
            .with_detector(DetectorConfig::peak(-1.0))
            .with_detector(DetectorConfig::fast(5.0).with_label("a"))
            .with_detector(DetectorConfig::rms(5.0).with_label("a"));

        match validate_preset(&preset) {
            Err(ValidationError::Multiple(errors)) => {
                assert!(errors.contains(&ValidationError::InvalidSampleRate(0)));
                assert!(errors.contains(&ValidationError::DuplicateLabel("a".to_string())));
                assert!(
                    errors
                        .iter()
                        .any(|e| matches!(e, ValidationError::OutOfRange { .. }))
                );
            }
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_preset_single_error_is_unwrapped() {
        let preset = DetectorPreset::new("One").with_detector(DetectorConfig::new(DetectorKind::Peak));
        assert!(matches!(
            validate_preset(&preset),
            Err(ValidationError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::MissingParameter {
            kind: DetectorKind::Envelope,
            param: "attack_ms",
        };
        assert_eq!(err.to_string(), "envelope detector requires 'attack_ms'");

        let err = ValidationError::Multiple(vec![
            ValidationError::InvalidSampleRate(0),
            ValidationError::DuplicateLabel("x".to_string()),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("sample rate 0 Hz out of range"));
        assert!(msg.contains("duplicate detector label 'x'"));
    }
}
