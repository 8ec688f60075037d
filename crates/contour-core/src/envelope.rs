//! Exponential envelope followers.
//!
//! Used for dynamics processing (compressors, gates, ducking) and sidechain
//! detection. Both followers run the same one-pole law:
//!
//! ```text
//! y[n] = x[n] + k · (y[n-1] − x[n])
//! ```
//!
//! with `k` chosen per sample from the attack or release coefficient
//! (see [`decay_coefficient`](crate::decay_coefficient)).
//!
//! - [`EnvelopeFollower`] - separate attack and release times
//! - [`PeakEnvelopeFollower`] - instant attack, exponential release
//!
//! Neither follower rectifies its input. Feed `x.abs()` (or a squared signal)
//! for amplitude tracking.

use core::time::Duration;

use crate::error::{ParamError, check_duration, check_sample_rate};
use crate::follower::Follower;
use crate::time_constant::duration_coefficient;

/// Two-sided exponential envelope follower.
///
/// Rising input moves the envelope with the attack coefficient, falling input
/// with the release coefficient. After one attack time a step has been
/// covered to `1 − e⁻² ≈ 86.5%`; after one release time a drop has decayed to
/// `e⁻² ≈ 13.5%` of its height.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use contour_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::new(
///     Duration::from_millis(10),
///     Duration::from_millis(100),
///     48000.0,
/// );
///
/// let input_sample: f32 = -0.5;
/// let envelope_level = env.process(input_sample.abs());
/// assert!(envelope_level > 0.0 && envelope_level < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    /// Current envelope level (linear)
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    attack: Duration,
    release: Duration,
    sample_rate: f32,
}

impl EnvelopeFollower {
    /// Create a follower with the given attack and release times.
    ///
    /// Arguments are not checked; use [`try_new`](Self::try_new) to reject
    /// zero times or invalid sample rates.
    pub fn new(attack: Duration, release: Duration, sample_rate: f32) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(?attack, ?release, sample_rate, "envelope_follower: new");

        Self {
            envelope: 0.0,
            attack_coeff: duration_coefficient(attack, sample_rate),
            release_coeff: duration_coefficient(release, sample_rate),
            attack,
            release,
            sample_rate,
        }
    }

    /// Validating variant of [`new`](Self::new).
    pub fn try_new(
        attack: Duration,
        release: Duration,
        sample_rate: f32,
    ) -> Result<Self, ParamError> {
        check_duration("attack", attack)?;
        check_duration("release", release)?;
        check_sample_rate(sample_rate)?;
        Ok(Self::new(attack, release, sample_rate))
    }

    /// Process a sample and return the updated envelope.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let coeff = if input > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = input + coeff * (self.envelope - input);
        self.envelope
    }

    /// Current envelope without processing new input.
    #[inline]
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Overwrite the envelope, e.g. to start at a known level and avoid an
    /// attack transient at stream start.
    pub fn set_level(&mut self, level: f32) {
        self.envelope = level;
    }

    /// Change the attack time. Takes effect on the next sample.
    pub fn set_attack(&mut self, attack: Duration) {
        self.attack = attack;
        self.attack_coeff = duration_coefficient(attack, self.sample_rate);
    }

    /// Change the release time. Takes effect on the next sample.
    pub fn set_release(&mut self, release: Duration) {
        self.release = release;
        self.release_coeff = duration_coefficient(release, self.sample_rate);
    }

    /// Replace attack, release, and sample rate at once.
    ///
    /// The current envelope level is kept.
    pub fn configure(&mut self, attack: Duration, release: Duration, sample_rate: f32) {
        #[cfg(feature = "tracing")]
        tracing::debug!(?attack, ?release, sample_rate, "envelope_follower: configure");

        self.sample_rate = sample_rate;
        self.set_attack(attack);
        self.set_release(release);
    }

    /// Update sample rate and recalculate both coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.configure(self.attack, self.release, sample_rate);
    }

    /// Attack time.
    pub fn attack(&self) -> Duration {
        self.attack
    }

    /// Release time.
    pub fn release(&self) -> Duration {
        self.release
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Per-sample attack coefficient, in `(0, 1)`.
    pub fn attack_coefficient(&self) -> f32 {
        self.attack_coeff
    }

    /// Per-sample release coefficient, in `(0, 1)`.
    pub fn release_coefficient(&self) -> f32 {
        self.release_coeff
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

impl Default for EnvelopeFollower {
    /// 10 ms attack, 100 ms release at 48 kHz.
    fn default() -> Self {
        Self::new(Duration::from_millis(10), Duration::from_millis(100), 48000.0)
    }
}

impl Follower for EnvelopeFollower {
    type Output = f32;

    fn process(&mut self, input: f32) -> f32 {
        EnvelopeFollower::process(self, input)
    }

    fn level(&self) -> f32 {
        EnvelopeFollower::level(self)
    }

    fn reset(&mut self) {
        EnvelopeFollower::reset(self);
    }
}

/// Envelope follower with instant attack.
///
/// Any sample above the envelope is taken as the new envelope exactly; below
/// it, the envelope decays with the release law of [`EnvelopeFollower`].
/// Suited to peak limiters and meters that must never under-read a transient.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use contour_core::PeakEnvelopeFollower;
///
/// let mut peak = PeakEnvelopeFollower::new(Duration::from_millis(100), 48000.0);
/// assert_eq!(peak.process(0.8), 0.8);
/// assert!(peak.process(0.0) < 0.8);
/// ```
#[derive(Debug, Clone)]
pub struct PeakEnvelopeFollower {
    envelope: f32,
    release_coeff: f32,
    release: Duration,
    sample_rate: f32,
}

impl PeakEnvelopeFollower {
    /// Create a follower with the given release time.
    pub fn new(release: Duration, sample_rate: f32) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(?release, sample_rate, "peak_envelope_follower: new");

        Self {
            envelope: 0.0,
            release_coeff: duration_coefficient(release, sample_rate),
            release,
            sample_rate,
        }
    }

    /// Validating variant of [`new`](Self::new).
    pub fn try_new(release: Duration, sample_rate: f32) -> Result<Self, ParamError> {
        check_duration("release", release)?;
        check_sample_rate(sample_rate)?;
        Ok(Self::new(release, sample_rate))
    }

    /// Process a sample and return the updated envelope.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.envelope = if input > self.envelope {
            input
        } else {
            input + self.release_coeff * (self.envelope - input)
        };
        self.envelope
    }

    /// Current envelope without processing new input.
    #[inline]
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Overwrite the envelope.
    pub fn set_level(&mut self, level: f32) {
        self.envelope = level;
    }

    /// Change the release time. Takes effect on the next sample.
    pub fn set_release(&mut self, release: Duration) {
        self.release = release;
        self.release_coeff = duration_coefficient(release, self.sample_rate);
    }

    /// Update sample rate and recalculate the release coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.set_release(self.release);
    }

    /// Release time.
    pub fn release(&self) -> Duration {
        self.release
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Per-sample release coefficient, in `(0, 1)`.
    pub fn release_coefficient(&self) -> f32 {
        self.release_coeff
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

impl Follower for PeakEnvelopeFollower {
    type Output = f32;

    fn process(&mut self, input: f32) -> f32 {
        PeakEnvelopeFollower::process(self, input)
    }

    fn level(&self) -> f32 {
        PeakEnvelopeFollower::level(self)
    }

    fn reset(&mut self) {
        PeakEnvelopeFollower::reset(self);
    }
}
