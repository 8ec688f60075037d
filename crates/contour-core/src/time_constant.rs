//! Time-constant to per-sample coefficient conversion.
//!
//! Every follower in this crate derives its coefficients here, so attack,
//! release, and hold times mean the same thing everywhere.
//!
//! # Decay coefficient
//!
//! ```text
//! coeff = exp(-2 / (sample_rate * seconds))
//! ```
//!
//! A one-pole recurrence `y ← x + coeff·(y − x)` driven with this coefficient
//! covers `1 − e⁻² ≈ 86.5%` of a step within `seconds`. The factor of 2 makes
//! the nominal time read as "most of the way there" rather than the classic
//! 63% RC time constant.

use core::time::Duration;

use crate::fast_math::fast_exp3;
use libm::expf;

/// Below this argument [`fast_exp3`] loses accuracy; use `expf` instead.
const FAST_EXP_MIN_ARG: f32 = -0.5;

/// Largest `f32` strictly below 1.0.
const MAX_COEFF: f32 = 1.0 - f32::EPSILON / 2.0;

/// Per-sample decay coefficient for a time constant.
///
/// Uses [`fast_exp3`] for time constants of 4 samples or longer (the usual
/// case) and `expf` below that.
///
/// # Invariants
///
/// For positive finite `seconds` and `sample_rate`, the result is strictly
/// inside `(0, 1)`: very short times clamp to the smallest positive normal
/// float, very long times to the largest float below 1.0.
///
/// Non-positive arguments are a caller contract violation; the result is then
/// unspecified.
///
/// # Example
///
/// ```rust
/// use contour_core::decay_coefficient;
///
/// // 1 ms at 48 kHz: exp(-2 / 48)
/// let coeff = decay_coefficient(0.001, 48000.0);
/// assert!((coeff - libm::expf(-2.0 / 48.0)).abs() < 1e-6);
/// ```
#[inline]
pub fn decay_coefficient(seconds: f32, sample_rate: f32) -> f32 {
    let x = -2.0 / (sample_rate * seconds);
    let coeff = if x >= FAST_EXP_MIN_ARG {
        fast_exp3(x)
    } else {
        expf(x)
    };
    coeff.clamp(f32::MIN_POSITIVE, MAX_COEFF)
}

/// [`decay_coefficient`] for a [`Duration`].
#[inline]
pub fn duration_coefficient(time: Duration, sample_rate: f32) -> f32 {
    decay_coefficient(time.as_secs_f32(), sample_rate)
}

/// Number of whole samples covered by `time` at `sample_rate` (truncated).
///
/// Computed in `f64` so exact millisecond values at common rates do not
/// truncate one sample short.
///
/// ```rust
/// use core::time::Duration;
/// use contour_core::hold_samples;
///
/// assert_eq!(hold_samples(Duration::from_millis(10), 48000.0), 480);
/// assert_eq!(hold_samples(Duration::from_micros(10), 48000.0), 0);
/// ```
#[inline]
pub fn hold_samples(time: Duration, sample_rate: f32) -> usize {
    (time.as_secs_f64() * f64::from(sample_rate)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_exponential() {
        for &(secs, sr) in &[(0.001, 48000.0), (0.01, 44100.0), (0.5, 96000.0)] {
            let exact = libm::expf(-2.0 / (sr * secs));
            let coeff = decay_coefficient(secs, sr);
            assert!(
                (coeff - exact).abs() < 1e-5,
                "decay_coefficient({secs}, {sr}) = {coeff}, expected {exact}"
            );
        }
    }

    #[test]
    fn short_times_use_exact_exponential() {
        // One sample: exp(-2)
        let coeff = decay_coefficient(1.0 / 48000.0, 48000.0);
        assert!((coeff - libm::expf(-2.0)).abs() < 1e-5, "got {coeff}");
    }

    #[test]
    fn strictly_inside_unit_interval_at_extremes() {
        let tiny = decay_coefficient(1e-12, 8000.0);
        assert!(tiny > 0.0 && tiny < 1.0, "tiny time gave {tiny}");

        let huge = decay_coefficient(1e6, 192000.0);
        assert!(huge > 0.0 && huge < 1.0, "huge time gave {huge}");
    }

    #[test]
    fn longer_times_give_larger_coefficients() {
        let fast = decay_coefficient(0.001, 48000.0);
        let slow = decay_coefficient(0.1, 48000.0);
        assert!(slow > fast);
    }

    #[test]
    fn hold_samples_truncates() {
        assert_eq!(hold_samples(Duration::from_millis(10), 48000.0), 480);
        assert_eq!(hold_samples(Duration::from_micros(22_700), 44100.0), 1001);
        assert_eq!(hold_samples(Duration::ZERO, 48000.0), 0);
    }
}
