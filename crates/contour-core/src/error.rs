//! Constructor argument validation.
//!
//! The per-sample path never fails. Plain constructors (`new`,
//! `with_samples`) trust their arguments; the `try_*` constructors check them
//! with the functions here and reject construction instead.

use core::time::Duration;

/// Invalid follower construction argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamError {
    /// A time constant was zero.
    ZeroDuration {
        /// Which time constant (`"attack"`, `"release"`, `"hold"`).
        name: &'static str,
    },
    /// The sample rate was zero, negative, or not finite.
    InvalidSampleRate(f32),
    /// A hold or window length truncated to zero samples.
    ZeroHold,
}

impl core::fmt::Display for ParamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroDuration { name } => write!(f, "{name} time must be greater than zero"),
            Self::InvalidSampleRate(sr) => {
                write!(f, "sample rate must be positive and finite, got {sr}")
            }
            Self::ZeroHold => write!(f, "hold must span at least one sample"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParamError {}

/// Reject a zero time constant.
pub(crate) fn check_duration(name: &'static str, time: Duration) -> Result<(), ParamError> {
    if time.is_zero() {
        Err(ParamError::ZeroDuration { name })
    } else {
        Ok(())
    }
}

/// Reject a non-positive or non-finite sample rate.
pub(crate) fn check_sample_rate(sample_rate: f32) -> Result<(), ParamError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(ParamError::InvalidSampleRate(sample_rate))
    }
}

/// Reject a zero-sample hold.
pub(crate) fn check_hold_samples(hold_samples: usize) -> Result<(), ParamError> {
    if hold_samples == 0 {
        Err(ParamError::ZeroHold)
    } else {
        Ok(())
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ParamError::ZeroDuration { name: "attack" }.to_string(),
            "attack time must be greater than zero"
        );
        assert_eq!(
            ParamError::InvalidSampleRate(-1.0).to_string(),
            "sample rate must be positive and finite, got -1"
        );
        assert_eq!(
            ParamError::ZeroHold.to_string(),
            "hold must span at least one sample"
        );
    }

    #[test]
    fn sample_rate_checks() {
        assert!(check_sample_rate(48000.0).is_ok());
        assert!(check_sample_rate(0.0).is_err());
        assert!(check_sample_rate(-44100.0).is_err());
        assert!(check_sample_rate(f32::NAN).is_err());
        assert!(check_sample_rate(f32::INFINITY).is_err());
    }

    #[test]
    fn duration_and_hold_checks() {
        assert!(check_duration("hold", Duration::from_millis(1)).is_ok());
        assert_eq!(
            check_duration("hold", Duration::ZERO),
            Err(ParamError::ZeroDuration { name: "hold" })
        );
        assert!(check_hold_samples(1).is_ok());
        assert_eq!(check_hold_samples(0), Err(ParamError::ZeroHold));
    }
}
