//! Common interface for envelope followers.
//!
//! Every follower in this crate is a single-sample stream transducer: push a
//! sample and get the updated envelope back, or peek at the last envelope
//! without disturbing state. [`Follower`] captures that contract so detector
//! code (compressor sidechains, gates, meters) can be generic over the
//! detection law.
//!
//! ## Design Decisions
//!
//! - **Associated output**: linear followers return `f32`, the dB-domain RMS
//!   follower returns [`Decibel`](crate::Decibel). Generic code picks the
//!   domain it needs through `Follower<Output = f32>` or
//!   `Follower<Output = Decibel>`.
//!
//! - **No chaining or block API**: composite followers own their parts by
//!   value and call them directly. Callers own the audio loop.
//!
//! - **No allocations**: all methods are real-time safe.

/// Core trait for all envelope followers.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use contour_core::{Follower, PeakEnvelopeFollower};
///
/// fn track<F: Follower<Output = f32>>(follower: &mut F, input: &[f32]) -> f32 {
///     for &s in input {
///         follower.process(s);
///     }
///     follower.level()
/// }
///
/// let mut peak = PeakEnvelopeFollower::new(Duration::from_millis(50), 48000.0);
/// assert_eq!(track(&mut peak, &[0.2, 0.7]), 0.7);
/// ```
pub trait Follower {
    /// Envelope value type (`f32` or [`Decibel`](crate::Decibel)).
    type Output: Copy;

    /// Push one sample and return the updated envelope.
    fn process(&mut self, input: f32) -> Self::Output;

    /// Last envelope value, without pushing a sample.
    ///
    /// Calling this repeatedly without an intervening
    /// [`process`](Self::process) returns identical values.
    fn level(&self) -> Self::Output;

    /// Return to the freshly constructed state, keeping configuration.
    fn reset(&mut self);
}
