//! Decibel-domain level type.
//!
//! [`Decibel`] wraps an `f32` holding `20·log₁₀(linear)`. Arithmetic by a
//! scalar happens in the log domain, so dividing by 2 takes a square root of
//! the underlying linear value:
//!
//! ```text
//! dB(√x) = 20·log₁₀(√x) = 10·log₁₀(x) = dB(x) / 2
//! ```
//!
//! [`FastRmsEnvelopeFollowerDb`](crate::FastRmsEnvelopeFollowerDb) relies on
//! this identity to skip the square root entirely.

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::math::{db_to_linear, linear_to_db};

/// A level in decibels.
///
/// # Example
///
/// ```rust
/// use contour_core::Decibel;
///
/// let power = Decibel::from_linear(0.25);
/// let amplitude = power / 2.0;
/// assert!((amplitude.to_linear() - 0.5).abs() < 1e-5);
/// assert!((amplitude.value() - (-6.0206)).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Decibel(f32);

impl Decibel {
    /// 0 dB (unity).
    pub const ZERO: Self = Self(0.0);

    /// Wrap a value already expressed in decibels.
    pub const fn new(db: f32) -> Self {
        Self(db)
    }

    /// Convert a linear magnitude. Zero and negative values map to −200 dB
    /// (see [`linear_to_db`]).
    #[inline]
    pub fn from_linear(linear: f32) -> Self {
        Self(linear_to_db(linear))
    }

    /// Convert back to a linear magnitude.
    #[inline]
    pub fn to_linear(self) -> f32 {
        db_to_linear(self.0)
    }

    /// The raw decibel value.
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl From<Decibel> for f32 {
    fn from(db: Decibel) -> Self {
        db.0
    }
}

impl Div<f32> for Decibel {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self(self.0 / rhs)
    }
}

impl Mul<f32> for Decibel {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}

impl Add for Decibel {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Decibel {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Decibel {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl core::fmt::Display for Decibel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2} dB", self.0)
    }
}
