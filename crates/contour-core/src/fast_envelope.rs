//! Fast-response, low-ripple envelope followers.
//!
//! A single running maximum that is cleared every `hold` samples tracks
//! peaks with no attack latency, but its output saws down to zero at every
//! clear. [`BasicFastEnvelopeFollower`] instead keeps `div + 1` running maxima
//! ("generations") and clears only one of them per hold period, round-robin.
//! The reported peak is the maximum over all generations, so a steady signal
//! never dips, while a real decay is still picked up within about
//! `div · hold` samples once every older generation has been cleared.
//!
//! There is no filtering: the output is a jagged staircase whose step length
//! is the hold time. That suits analysis such as onset detection. For a
//! smooth envelope, [`BasicSmoothedFastEnvelopeFollower`] runs the staircase
//! through a [`MovingAverage`] with the same window.
//!
//! # Choosing the hold time
//!
//! For monophonic signals, the hold should be equal to or slightly longer
//! than `1/div` of the period of the lowest frequency to be tracked.
//!
//! | Lowest note | Period | Hold (div = 2) |
//! |-------------|--------|----------------|
//! | E1 (41.2 Hz) | 24.3 ms | ≥ 12.2 ms |
//! | E2 (82.4 Hz) | 12.1 ms | ≥ 6.1 ms |
//! | A4 (440 Hz) | 2.27 ms | ≥ 1.14 ms |
//!
//! # Slot count
//!
//! The const parameter `SLOTS` is the number of generations, `div + 1`.
//! [`FastEnvelopeFollower`] and [`SmoothedFastEnvelopeFollower`] are the
//! `div = 2` configurations.

use core::time::Duration;

use crate::error::{ParamError, check_duration, check_hold_samples, check_sample_rate};
use crate::follower::Follower;
use crate::moving_average::MovingAverage;
use crate::time_constant::hold_samples;

/// Staggered-reset peak follower with `SLOTS = div + 1` generations.
///
/// # Invariants
///
/// - `SLOTS >= 2` (checked at compile time)
/// - The reported peak is the maximum over all generations
/// - At most one generation is cleared per sample
///
/// # Example
///
/// ```rust
/// use contour_core::FastEnvelopeFollower;
///
/// let mut env = FastEnvelopeFollower::with_samples(4);
/// assert_eq!(env.process(0.8), 0.8);
/// for _ in 0..4 {
///     // Held while the other generations remember the peak
///     assert_eq!(env.process(0.0), 0.8);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BasicFastEnvelopeFollower<const SLOTS: usize> {
    generations: [f32; SLOTS],
    peak: f32,
    tick: usize,
    /// Next generation to clear
    index: usize,
    hold_samples: usize,
}

/// Fast envelope follower with `div = 2` (three generations).
pub type FastEnvelopeFollower = BasicFastEnvelopeFollower<3>;

impl<const SLOTS: usize> BasicFastEnvelopeFollower<SLOTS> {
    /// The `div` parameter (`SLOTS - 1`). An isolated peak stays visible for
    /// between `div` and `div + 1` hold periods.
    pub const DIVISION: usize = SLOTS - 1;

    /// Create a follower holding each generation for `hold` at `sample_rate`.
    pub fn new(hold: Duration, sample_rate: f32) -> Self {
        Self::with_samples(hold_samples(hold, sample_rate))
    }

    /// Create a follower holding each generation for `hold_samples` samples.
    ///
    /// A hold of zero clears one generation on every sample.
    pub fn with_samples(hold_samples: usize) -> Self {
        const { assert!(SLOTS >= 2, "need at least two generations (div >= 1)") };

        #[cfg(feature = "tracing")]
        tracing::debug!(hold_samples, slots = SLOTS, "fast_envelope_follower: new");

        Self {
            generations: [0.0; SLOTS],
            peak: 0.0,
            tick: 0,
            index: 0,
            hold_samples,
        }
    }

    /// Validating variant of [`new`](Self::new).
    pub fn try_new(hold: Duration, sample_rate: f32) -> Result<Self, ParamError> {
        check_duration("hold", hold)?;
        check_sample_rate(sample_rate)?;
        Self::try_with_samples(hold_samples(hold, sample_rate))
    }

    /// Validating variant of [`with_samples`](Self::with_samples).
    pub fn try_with_samples(hold_samples: usize) -> Result<Self, ParamError> {
        check_hold_samples(hold_samples)?;
        Ok(Self::with_samples(hold_samples))
    }

    /// Process a sample and return the current peak.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        for y in &mut self.generations {
            *y = y.max(input);
        }

        // Clear the oldest generation once per hold period
        self.tick += 1;
        if self.tick >= self.hold_samples {
            self.tick = 0;
            self.generations[self.index] = 0.0;
            self.index = (self.index + 1) % SLOTS;
        }

        self.peak = self
            .generations
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);
        self.peak
    }

    /// Current peak without processing new input.
    #[inline]
    pub fn level(&self) -> f32 {
        self.peak
    }

    /// Hold period in samples.
    pub fn hold_samples(&self) -> usize {
        self.hold_samples
    }

    /// The `div` parameter (`SLOTS - 1`).
    pub const fn division(&self) -> usize {
        Self::DIVISION
    }

    /// Clear all generations and restart the hold cycle.
    pub fn reset(&mut self) {
        self.generations = [0.0; SLOTS];
        self.peak = 0.0;
        self.tick = 0;
        self.index = 0;
    }
}

impl<const SLOTS: usize> Follower for BasicFastEnvelopeFollower<SLOTS> {
    type Output = f32;

    fn process(&mut self, input: f32) -> f32 {
        BasicFastEnvelopeFollower::process(self, input)
    }

    fn level(&self) -> f32 {
        BasicFastEnvelopeFollower::level(self)
    }

    fn reset(&mut self) {
        BasicFastEnvelopeFollower::reset(self);
    }
}

/// [`BasicFastEnvelopeFollower`] smoothed by a [`MovingAverage`] of the same
/// window length.
///
/// The moving average adds `hold` samples of latency but removes the
/// staircase steps.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use contour_core::SmoothedFastEnvelopeFollower;
///
/// let mut env = SmoothedFastEnvelopeFollower::new(Duration::from_millis(1), 48000.0);
/// let mut level = 0.0;
/// for _ in 0..96 {
///     level = env.process(0.5);
/// }
/// assert!((level - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct BasicSmoothedFastEnvelopeFollower<const SLOTS: usize> {
    fast: BasicFastEnvelopeFollower<SLOTS>,
    smoother: MovingAverage,
}

/// Smoothed fast envelope follower with `div = 2`.
pub type SmoothedFastEnvelopeFollower = BasicSmoothedFastEnvelopeFollower<3>;

impl<const SLOTS: usize> BasicSmoothedFastEnvelopeFollower<SLOTS> {
    /// Create a follower with `hold` used for both the generations and the
    /// smoothing window.
    pub fn new(hold: Duration, sample_rate: f32) -> Self {
        Self::with_samples(hold_samples(hold, sample_rate))
    }

    /// Create a follower from a hold length in samples.
    pub fn with_samples(hold_samples: usize) -> Self {
        Self {
            fast: BasicFastEnvelopeFollower::with_samples(hold_samples),
            smoother: MovingAverage::with_samples(hold_samples),
        }
    }

    /// Validating variant of [`new`](Self::new).
    pub fn try_new(hold: Duration, sample_rate: f32) -> Result<Self, ParamError> {
        check_duration("hold", hold)?;
        check_sample_rate(sample_rate)?;
        Self::try_with_samples(hold_samples(hold, sample_rate))
    }

    /// Validating variant of [`with_samples`](Self::with_samples).
    pub fn try_with_samples(hold_samples: usize) -> Result<Self, ParamError> {
        check_hold_samples(hold_samples)?;
        Ok(Self::with_samples(hold_samples))
    }

    /// Process a sample and return the smoothed peak.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.smoother.process(self.fast.process(input))
    }

    /// Last smoothed peak without processing new input.
    #[inline]
    pub fn level(&self) -> f32 {
        self.smoother.level()
    }

    /// Hold period (and smoothing window) in samples.
    pub fn hold_samples(&self) -> usize {
        self.fast.hold_samples()
    }

    /// The unsmoothed staircase follower.
    pub fn staircase(&self) -> &BasicFastEnvelopeFollower<SLOTS> {
        &self.fast
    }

    /// Reset both stages.
    pub fn reset(&mut self) {
        self.fast.reset();
        self.smoother.reset();
    }
}

impl<const SLOTS: usize> Follower for BasicSmoothedFastEnvelopeFollower<SLOTS> {
    type Output = f32;

    fn process(&mut self, input: f32) -> f32 {
        BasicSmoothedFastEnvelopeFollower::process(self, input)
    }

    fn level(&self) -> f32 {
        BasicSmoothedFastEnvelopeFollower::level(self)
    }

    fn reset(&mut self) {
        BasicSmoothedFastEnvelopeFollower::reset(self);
    }
}
