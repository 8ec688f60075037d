//! Fast mathematical approximations for envelope detection.
//!
//! These functions trade full IEEE 754 precision for speed. Each function
//! documents its maximum error and valid input range.
//!
//! # When to use
//!
//! | Function | Replaces | Use case | Max error |
//! |----------|----------|----------|-----------|
//! | [`fast_exp3`] | `libm::expf` | Decay coefficients | < 0.4% on \[-0.5, 0.5\] |
//! | [`fast_sqrt`] | `libm::sqrtf` | RMS detection | < 0.2% |
//!
//! # When NOT to use
//!
//! [`fast_exp3`] is a truncated Taylor series: its error grows quickly outside
//! \[-0.5, 0.5\] and it turns negative below about −1.6. Coefficient code must
//! fall back to `libm::expf` for large arguments, as
//! [`decay_coefficient`](crate::decay_coefficient) does.
//!
//! # Performance
//!
//! Estimated Cortex-M7 cycles per call:
//!
//! | Function | Fast | libm equivalent |
//! |----------|------|-----------------|
//! | `fast_exp3` | ~6 | ~150 (`expf`) |
//! | `fast_sqrt` | ~20 | ~30 (`sqrtf`, no VSQRT: ~100) |

/// Fast exponential via third-order Taylor expansion.
///
/// Evaluates `1 + x + x²/2 + x³/6` in Horner form:
/// `(6 + x·(6 + x·(3 + x))) / 6`.
///
/// # Accuracy
///
/// | Range | Max relative error |
/// |-------|--------------------|
/// | \[-0.1, 0.1\] | < 0.001% |
/// | \[-0.25, 0.25\] | < 0.02% |
/// | \[-0.5, 0.5\] | < 0.4% |
///
/// Decay coefficients `exp(-2 / (sample_rate · seconds))` land in
/// \[-0.5, 0\] whenever the time constant spans at least 4 samples.
///
/// # Examples
///
/// ```
/// use contour_core::fast_math::fast_exp3;
///
/// assert_eq!(fast_exp3(0.0), 1.0);
/// assert!((fast_exp3(-0.1) - libm::expf(-0.1)).abs() < 1e-5);
/// ```
#[inline]
pub fn fast_exp3(x: f32) -> f32 {
    (6.0 + x * (6.0 + x * (3.0 + x))) * (1.0 / 6.0)
}

/// Fast square root via IEEE 754 exponent halving plus one Newton step.
///
/// Halving the biased exponent in the bit representation gives a seed within
/// about 6% of `√x`. One Newton–Raphson iteration `y ← (y + x/y) / 2`
/// squares the relative error.
///
/// # Accuracy
///
/// Maximum relative error: < 0.2% for normal positive `x`. The result is
/// never below the true root.
///
/// # Arguments
///
/// * `x` - Input value. Returns exactly `0.0` for `x ≤ 0` (including `-0.0`).
///
/// # Examples
///
/// ```
/// use contour_core::fast_math::fast_sqrt;
///
/// assert_eq!(fast_sqrt(0.0), 0.0);
/// assert!((fast_sqrt(4.0) - 2.0).abs() < 0.004);
/// assert!((fast_sqrt(0.25) - 0.5).abs() < 0.001);
/// ```
#[inline]
pub fn fast_sqrt(x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    // (bits >> 1) halves the biased exponent; re-add half the bias (127 << 22 ≈ 1 << 29)
    let seed = f32::from_bits((1 << 29) + (x.to_bits() >> 1) - (1 << 22));
    0.5 * (seed + x / seed)
}
