//! Moving-average (box) filter.
//!
//! Averages the last `N` input samples with a running sum:
//!
//! ```text
//! sum ← sum + x[n] − x[n−N]
//! y[n] = sum / N
//! ```
//!
//! One add, one subtract, and one divide per sample regardless of `N`. Used
//! to smooth the staircase output of the fast envelope followers; a window
//! equal to the staircase step length removes the steps entirely.
//!
//! Each time the write position wraps, the running sum is recomputed from the
//! ring, so rounding error never outlives one window. A window full of zeros
//! always averages to exactly `0.0`, however long the stream has run.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use crate::error::{ParamError, check_duration, check_hold_samples, check_sample_rate};
use crate::time_constant::hold_samples;

/// Moving-average filter over a fixed window (heap-allocated ring).
///
/// # Memory
///
/// The ring buffer is allocated once during construction and never
/// reallocates. No allocations occur during processing.
///
/// # Example
///
/// ```rust
/// use contour_core::MovingAverage;
///
/// let mut ma = MovingAverage::with_samples(4);
/// ma.process(1.0);
/// ma.process(1.0);
/// assert_eq!(ma.level(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct MovingAverage {
    buffer: Vec<f32>,
    pos: usize,
    sum: f32,
    output: f32,
}

impl MovingAverage {
    /// Create a moving average spanning `window` at `sample_rate`.
    ///
    /// The window length is `window · sample_rate` truncated, minimum one sample.
    pub fn new(window: Duration, sample_rate: f32) -> Self {
        Self::with_samples(hold_samples(window, sample_rate))
    }

    /// Create a moving average over `window_samples` samples (minimum 1).
    pub fn with_samples(window_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; window_samples.max(1)],
            pos: 0,
            sum: 0.0,
            output: 0.0,
        }
    }

    /// Validating variant of [`new`](Self::new).
    pub fn try_new(window: Duration, sample_rate: f32) -> Result<Self, ParamError> {
        check_duration("window", window)?;
        check_sample_rate(sample_rate)?;
        Self::try_with_samples(hold_samples(window, sample_rate))
    }

    /// Validating variant of [`with_samples`](Self::with_samples).
    pub fn try_with_samples(window_samples: usize) -> Result<Self, ParamError> {
        check_hold_samples(window_samples)?;
        Ok(Self::with_samples(window_samples))
    }

    /// Push one sample and return the average of the window.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.sum += input - self.buffer[self.pos];
        self.buffer[self.pos] = input;
        self.pos += 1;
        if self.pos == self.buffer.len() {
            self.pos = 0;
            self.sum = self.buffer.iter().sum();
        }
        self.output = self.sum / self.buffer.len() as f32;
        self.output
    }

    /// Last computed average, without pushing a sample.
    #[inline]
    pub fn level(&self) -> f32 {
        self.output
    }

    /// Window length in samples.
    pub fn window(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the window and running sum.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.pos = 0;
        self.sum = 0.0;
        self.output = 0.0;
    }
}
