//! Level conversions for envelope detection.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`DB_FLOOR_LINEAR`] - Smallest linear value [`linear_to_db`] distinguishes

use libm::{expf, logf};

/// Linear values at or below this are reported as −200 dB by [`linear_to_db`].
pub const DB_FLOOR_LINEAR: f32 = 1e-10;

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use contour_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs below [`DB_FLOOR_LINEAR`] (including zero and negatives) are
/// clamped, so silence maps to −200 dB instead of −∞.
///
/// # Example
/// ```rust
/// use contour_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(DB_FLOOR_LINEAR)) * FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        let original = 0.5;
        let db = linear_to_db(original);
        let back = db_to_linear(db);
        assert!(
            (original - back).abs() < 1e-5,
            "Roundtrip failed: {} -> {} -> {}",
            original,
            db,
            back
        );
    }

    #[test]
    fn test_db_known_values() {
        // 0 dB = 1.0 linear
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        // -120 dB = 1e-6 linear (RMS noise floor)
        assert!((db_to_linear(-120.0) - 1e-6).abs() < 1e-10);
        // +6 dB ≈ 2.0 linear
        assert!((db_to_linear(6.0206) - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!((linear_to_db(0.0) + 200.0).abs() < 0.01);
        assert_eq!(linear_to_db(0.0), linear_to_db(-1.0));
        assert_eq!(linear_to_db(0.0), linear_to_db(DB_FLOOR_LINEAR));
    }
}
