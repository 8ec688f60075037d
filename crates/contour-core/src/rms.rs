//! Fast moving-RMS envelope followers.
//!
//! Signal path:
//!
//! ```text
//! x ──▶ x² ──▶ SmoothedFastEnvelopeFollower ──▶ noise gate ──▶ √ ──▶ linear RMS
//!                                                         └──▶ dB / 2 ──▶ RMS in dB
//! ```
//!
//! Tracking the mean square and taking the root only at the output keeps the
//! per-sample cost to one multiply plus the smoothed fast follower. The dB
//! variant skips the root entirely: `dB(√x) = dB(x) / 2`, which also saves
//! the linear-to-dB conversion a compressor, expander, or AGC would otherwise
//! perform on the follower's output.
//!
//! # Noise gate
//!
//! Mean-square values below [`RMS_NOISE_FLOOR`] (−120 dB, i.e. RMS below
//! −60 dBFS) are forced to exactly zero. This hides the residue the moving
//! average's running sum leaves behind at silence, so silence reads as exactly
//! `0.0`. The gate is a hard step: there is no transition region.

use core::time::Duration;

use crate::decibel::Decibel;
use crate::error::ParamError;
use crate::fast_envelope::SmoothedFastEnvelopeFollower;
use crate::fast_math::fast_sqrt;
use crate::follower::Follower;

/// Mean-square values below this (−120 dB) are treated as silence.
pub const RMS_NOISE_FLOOR: f32 = 1e-6;

/// Moving-RMS follower with linear output.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use contour_core::FastRmsEnvelopeFollower;
///
/// let mut rms = FastRmsEnvelopeFollower::new(Duration::from_millis(1), 48000.0);
/// let mut level = 0.0;
/// for _ in 0..200 {
///     level = rms.process(-0.5);
/// }
/// assert!((level - 0.5).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct FastRmsEnvelopeFollower {
    mean_square: SmoothedFastEnvelopeFollower,
    rms: f32,
}

impl FastRmsEnvelopeFollower {
    /// Create a follower with hold (and smoothing window) `hold`.
    pub fn new(hold: Duration, sample_rate: f32) -> Self {
        Self::from_mean_square(SmoothedFastEnvelopeFollower::new(hold, sample_rate))
    }

    /// Create a follower from a hold length in samples.
    pub fn with_samples(hold_samples: usize) -> Self {
        Self::from_mean_square(SmoothedFastEnvelopeFollower::with_samples(hold_samples))
    }

    /// Validating variant of [`new`](Self::new).
    pub fn try_new(hold: Duration, sample_rate: f32) -> Result<Self, ParamError> {
        SmoothedFastEnvelopeFollower::try_new(hold, sample_rate).map(Self::from_mean_square)
    }

    /// Validating variant of [`with_samples`](Self::with_samples).
    pub fn try_with_samples(hold_samples: usize) -> Result<Self, ParamError> {
        SmoothedFastEnvelopeFollower::try_with_samples(hold_samples).map(Self::from_mean_square)
    }

    fn from_mean_square(mean_square: SmoothedFastEnvelopeFollower) -> Self {
        Self {
            mean_square,
            rms: 0.0,
        }
    }

    /// Square, smooth, and gate one sample. Does not update [`level`](Self::level).
    #[inline]
    fn gated_mean_square(&mut self, input: f32) -> f32 {
        let e = self.mean_square.process(input * input);
        if e < RMS_NOISE_FLOOR { 0.0 } else { e }
    }

    /// Process a sample and return the moving RMS.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.rms = fast_sqrt(self.gated_mean_square(input));
        self.rms
    }

    /// Last RMS value without processing new input.
    #[inline]
    pub fn level(&self) -> f32 {
        self.rms
    }

    /// Hold period (and smoothing window) in samples.
    pub fn hold_samples(&self) -> usize {
        self.mean_square.hold_samples()
    }

    /// Reset to silence.
    pub fn reset(&mut self) {
        self.mean_square.reset();
        self.rms = 0.0;
    }
}

impl Follower for FastRmsEnvelopeFollower {
    type Output = f32;

    fn process(&mut self, input: f32) -> f32 {
        FastRmsEnvelopeFollower::process(self, input)
    }

    fn level(&self) -> f32 {
        FastRmsEnvelopeFollower::level(self)
    }

    fn reset(&mut self) {
        FastRmsEnvelopeFollower::reset(self);
    }
}

/// Moving-RMS follower with output in decibels.
///
/// Same detector as [`FastRmsEnvelopeFollower`]; only the final step
/// differs. Silence (gated mean square of zero) reads as
/// `Decibel::from_linear(0.0) / 2`, about −100 dB.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use contour_core::FastRmsEnvelopeFollowerDb;
///
/// let mut rms = FastRmsEnvelopeFollowerDb::new(Duration::from_millis(1), 48000.0);
/// let mut level = rms.level();
/// for _ in 0..200 {
///     level = rms.process(0.5);
/// }
/// assert!((level.value() - (-6.0206)).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct FastRmsEnvelopeFollowerDb {
    detector: FastRmsEnvelopeFollower,
    level: Decibel,
}

impl FastRmsEnvelopeFollowerDb {
    /// Create a follower with hold (and smoothing window) `hold`.
    pub fn new(hold: Duration, sample_rate: f32) -> Self {
        Self::from_detector(FastRmsEnvelopeFollower::new(hold, sample_rate))
    }

    /// Create a follower from a hold length in samples.
    pub fn with_samples(hold_samples: usize) -> Self {
        Self::from_detector(FastRmsEnvelopeFollower::with_samples(hold_samples))
    }

    /// Validating variant of [`new`](Self::new).
    pub fn try_new(hold: Duration, sample_rate: f32) -> Result<Self, ParamError> {
        FastRmsEnvelopeFollower::try_new(hold, sample_rate).map(Self::from_detector)
    }

    /// Validating variant of [`with_samples`](Self::with_samples).
    pub fn try_with_samples(hold_samples: usize) -> Result<Self, ParamError> {
        FastRmsEnvelopeFollower::try_with_samples(hold_samples).map(Self::from_detector)
    }

    fn from_detector(detector: FastRmsEnvelopeFollower) -> Self {
        Self {
            detector,
            level: silence(),
        }
    }

    /// Process a sample and return the moving RMS in dB.
    #[inline]
    pub fn process(&mut self, input: f32) -> Decibel {
        // Square root in the dB domain
        self.level = Decibel::from_linear(self.detector.gated_mean_square(input)) / 2.0;
        self.level
    }

    /// Last RMS level without processing new input.
    #[inline]
    pub fn level(&self) -> Decibel {
        self.level
    }

    /// Hold period (and smoothing window) in samples.
    pub fn hold_samples(&self) -> usize {
        self.detector.hold_samples()
    }

    /// Reset to silence.
    pub fn reset(&mut self) {
        self.detector.reset();
        self.level = silence();
    }
}

impl Follower for FastRmsEnvelopeFollowerDb {
    type Output = Decibel;

    fn process(&mut self, input: f32) -> Decibel {
        FastRmsEnvelopeFollowerDb::process(self, input)
    }

    fn level(&self) -> Decibel {
        FastRmsEnvelopeFollowerDb::level(self)
    }

    fn reset(&mut self) {
        FastRmsEnvelopeFollowerDb::reset(self);
    }
}

fn silence() -> Decibel {
    Decibel::from_linear(0.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD: usize = 48;

    #[test]
    fn constant_input_converges_to_magnitude() {
        for &a in &[0.3_f32, -0.3, 0.05, 1.0] {
            let mut rms = FastRmsEnvelopeFollower::with_samples(HOLD);
            let mut y = 0.0;
            for _ in 0..HOLD * 10 {
                y = rms.process(a);
            }
            assert!(
                (y - a.abs()).abs() <= a.abs() * 0.003,
                "RMS of constant {a} should be {}, got {y}",
                a.abs()
            );
        }
    }

    #[test]
    fn silence_is_exactly_zero() {
        let mut rms = FastRmsEnvelopeFollower::with_samples(HOLD);
        for _ in 0..HOLD * 4 {
            assert_eq!(rms.process(0.0), 0.0);
        }
    }

    #[test]
    fn below_noise_floor_is_gated() {
        let mut rms = FastRmsEnvelopeFollower::with_samples(HOLD);
        // 1e-4 squared is 1e-8, below the -120 dB floor
        for _ in 0..HOLD * 4 {
            assert_eq!(rms.process(1e-4), 0.0);
        }
        // 1e-2 squared is 1e-4, above it
        let mut y = 0.0;
        for _ in 0..HOLD * 4 {
            y = rms.process(1e-2);
        }
        assert!(y > 0.0);
    }

    #[test]
    fn returns_to_zero_after_burst() {
        let mut rms = FastRmsEnvelopeFollower::with_samples(HOLD);
        for n in 0..HOLD * 10 {
            rms.process(libm::sinf(n as f32 * 0.3) * 0.7);
        }
        assert!(rms.level() > 0.3);
        for _ in 0..HOLD * 10 {
            rms.process(0.0);
        }
        assert_eq!(rms.level(), 0.0);
    }

    #[test]
    fn silence_after_a_minute_of_noise() {
        let mut rms = FastRmsEnvelopeFollower::new(Duration::from_millis(10), 48000.0);
        let mut rms_db = FastRmsEnvelopeFollowerDb::new(Duration::from_millis(10), 48000.0);
        let mut state: u32 = 1;
        for _ in 0..48000 * 60 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let x = ((state >> 8) as f32 / (1 << 23) as f32 - 1.0) * 0.9;
            rms.process(x);
            rms_db.process(x);
        }
        assert!(rms.level() > 0.1);

        for _ in 0..48000 {
            rms.process(0.0);
            rms_db.process(0.0);
        }
        assert_eq!(rms.process(0.0), 0.0);
        assert_eq!(rms_db.process(0.0), silence());
    }

    #[test]
    fn db_matches_linear() {
        let mut lin = FastRmsEnvelopeFollower::with_samples(HOLD);
        let mut db = FastRmsEnvelopeFollowerDb::with_samples(HOLD);
        let mut compared = 0;
        for n in 0..4800 {
            let t = n as f32 / 48000.0;
            let s = libm::sinf(core::f32::consts::TAU * 440.0 * t) * (0.1 + 0.8 * t * 10.0);
            let l = lin.process(s);
            let d = db.process(s);
            if l > 0.0 {
                let expected = 20.0 * libm::log10f(l);
                assert!(
                    (d.value() - expected).abs() < 0.05,
                    "sample {n}: {} dB vs 20·log10({l}) = {expected}",
                    d.value()
                );
                compared += 1;
            }
        }
        assert!(compared > 4000);
    }

    #[test]
    fn db_silence_reads_floor() {
        let mut db = FastRmsEnvelopeFollowerDb::with_samples(HOLD);
        assert!((db.level().value() + 100.0).abs() < 0.01);
        assert!((db.process(0.0).value() + 100.0).abs() < 0.01);
    }

    #[test]
    fn level_and_reset() {
        let mut rms = FastRmsEnvelopeFollower::with_samples(4);
        let mut db = FastRmsEnvelopeFollowerDb::with_samples(4);
        for _ in 0..8 {
            rms.process(0.5);
            db.process(0.5);
        }
        assert_eq!(rms.level(), rms.level());
        assert_eq!(rms.level(), 0.5);
        assert_eq!(db.level(), db.level());

        rms.reset();
        db.reset();
        assert_eq!(rms.level(), 0.0);
        assert_eq!(db.level(), silence());
        assert_eq!(db.hold_samples(), 4);
    }

    #[test]
    fn try_constructors() {
        assert_eq!(
            FastRmsEnvelopeFollower::try_with_samples(0).unwrap_err(),
            ParamError::ZeroHold
        );
        assert!(FastRmsEnvelopeFollowerDb::try_new(Duration::from_millis(5), 0.0).is_err());
        assert!(FastRmsEnvelopeFollowerDb::try_new(Duration::from_millis(5), 48000.0).is_ok());
    }
}
