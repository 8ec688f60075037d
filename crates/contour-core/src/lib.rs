//! Contour Core - envelope followers for audio dynamics and analysis
//!
//! This crate provides stateful, sample-by-sample envelope followers that
//! track the amplitude or RMS power of a streaming signal. They are the
//! detectors behind compressors, gates, auto-gain control, and onset
//! detection, designed for real-time processing with zero allocation in the
//! audio path.
//!
//! # Followers
//!
//! | Type | Attack | Release | Output |
//! |------|--------|---------|--------|
//! | [`EnvelopeFollower`] | exponential | exponential | linear |
//! | [`PeakEnvelopeFollower`] | instant | exponential | linear |
//! | [`FastEnvelopeFollower`] | instant | staircase hold | linear |
//! | [`SmoothedFastEnvelopeFollower`] | `hold` ramp | smoothed hold | linear |
//! | [`FastRmsEnvelopeFollower`] | `hold` ramp | smoothed hold | linear RMS |
//! | [`FastRmsEnvelopeFollowerDb`] | `hold` ramp | smoothed hold | RMS in dB |
//!
//! All of them implement [`Follower`]: `process` pushes one sample and
//! returns the new envelope, `level` peeks at the last one.
//!
//! Composite followers own their stages by value: the RMS followers contain a
//! [`SmoothedFastEnvelopeFollower`], which contains a
//! [`FastEnvelopeFollower`] and a [`MovingAverage`].
//!
//! ## Building Blocks
//!
//! - [`decay_coefficient`] - Time constant to per-sample coefficient, shared by every follower
//! - [`MovingAverage`] - Box filter used for staircase smoothing
//! - [`Decibel`] - Log-domain level type
//! - [`fast_exp3`], [`fast_sqrt`] - Fast approximations used in coefficient and RMS math
//!
//! ## Validation
//!
//! Plain constructors trust their arguments. Each follower also has
//! `try_new` / `try_with_samples` returning [`ParamError`] for zero times,
//! zero holds, or invalid sample rates.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! contour-core = { version = "0.1", default-features = false }
//! ```
//!
//! The optional `tracing` feature emits `debug` events from constructors and
//! reconfiguration (never from `process`).
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use contour_core::{EnvelopeFollower, FastRmsEnvelopeFollowerDb};
//!
//! let mut detector = FastRmsEnvelopeFollowerDb::new(Duration::from_millis(12), 48000.0);
//! let mut gain_smoother =
//!     EnvelopeFollower::new(Duration::from_millis(5), Duration::from_millis(80), 48000.0);
//!
//! let threshold_db = -18.0;
//! let ratio = 4.0;
//! for n in 0..4800 {
//!     let input = libm::sinf(n as f32 * 0.05) * 0.8;
//!     let level = detector.process(input).value();
//!     let over = (level - threshold_db).max(0.0);
//!     let reduction_db = gain_smoother.process(over * (1.0 - 1.0 / ratio));
//!     let _output = input * contour_core::db_to_linear(-reduction_db);
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Value types**: Followers are plain data, one instance per channel

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod decibel;
pub mod envelope;
pub mod error;
pub mod fast_envelope;
pub mod fast_math;
pub mod follower;
pub mod math;
pub mod moving_average;
pub mod rms;
pub mod time_constant;

// Re-export main types at crate root
pub use decibel::Decibel;
pub use envelope::{EnvelopeFollower, PeakEnvelopeFollower};
pub use error::ParamError;
pub use fast_envelope::{
    BasicFastEnvelopeFollower, BasicSmoothedFastEnvelopeFollower, FastEnvelopeFollower,
    SmoothedFastEnvelopeFollower,
};
pub use fast_math::{fast_exp3, fast_sqrt};
pub use follower::Follower;
pub use math::{DB_FLOOR_LINEAR, db_to_linear, linear_to_db};
pub use moving_average::MovingAverage;
pub use rms::{FastRmsEnvelopeFollower, FastRmsEnvelopeFollowerDb, RMS_NOISE_FLOOR};
pub use time_constant::{decay_coefficient, duration_coefficient, hold_samples};
