//! Increment snapping with a fixed half-increment tension.

use crate::types::{EPSILON, Vec3};

/// Fraction of an increment past which a value snaps to the next multiple
pub const SNAP_TENSION: f32 = 0.5;

/// Snap `value` to a multiple of `increment`.
///
/// The remainder keeps the sign of `value`. Remainders under half an
/// increment drop back to the lower multiple, anything else (the exact half
/// included) moves one increment further away from zero. An increment at or
/// below `EPSILON` leaves the value untouched.
pub fn snap(value: f32, increment: f32) -> f32 {
    if !(increment > EPSILON) || !value.is_finite() {
        return value;
    }

    let modulo = value % increment;
    let ratio = modulo.abs() / increment;
    if ratio < SNAP_TENSION {
        value - modulo
    } else {
        let sign = if value < 0.0 { -1.0 } else { 1.0 };
        value - modulo + increment * sign
    }
}

/// Component-wise [`snap`]
pub fn snap_vec3(value: Vec3, increments: Vec3) -> Vec3 {
    Vec3::new(
        snap(value.x, increments.x),
        snap(value.y, increments.y),
        snap(value.z, increments.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_snap_below_and_above_tension() {
        assert_relative_eq!(snap(1.2, 0.5), 1.0, epsilon = 1e-6);
        assert_relative_eq!(snap(1.3, 0.5), 1.5, epsilon = 1e-6);
        assert_relative_eq!(snap(37.0, 15.0), 30.0);
        assert_relative_eq!(snap(38.0, 15.0), 45.0);
    }

    #[test]
    fn test_snap_negative_values_mirror() {
        assert_relative_eq!(snap(-1.2, 0.5), -1.0, epsilon = 1e-6);
        assert_relative_eq!(snap(-1.3, 0.5), -1.5, epsilon = 1e-6);
        assert_relative_eq!(snap(-38.0, 15.0), -45.0);
    }

    #[test]
    fn test_snap_tie_rounds_away_from_zero() {
        assert_eq!(snap(0.25, 0.5), 0.5);
        assert_eq!(snap(-0.25, 0.5), -0.5);
        assert_eq!(snap(7.5, 15.0), 15.0);
    }

    #[test]
    fn test_snap_is_noop_without_increment() {
        assert_eq!(snap(1.234, 0.0), 1.234);
        assert_eq!(snap(1.234, -2.0), 1.234);
        assert_eq!(snap(1.234, 1e-9), 1.234);
        assert_eq!(snap(0.0, 0.25), 0.0);
        assert_eq!(snap(3.0, 1.0), 3.0);
    }

    #[test]
    fn test_snapped_values_are_multiples() {
        for i in -40..40 {
            let value = i as f32 * 0.37;
            let snapped = snap(value, 0.25);
            let steps = snapped / 0.25;
            assert_relative_eq!(steps, steps.round(), epsilon = 1e-3);
            assert!((snapped - value).abs() <= 0.125 + 1e-5);
        }
    }

    #[test]
    fn test_snap_vec3_per_component() {
        let snapped = snap_vec3(Vec3::new(1.3, 0.26, 5.0), Vec3::new(1.0, 0.25, 0.0));
        assert_relative_eq!(snapped, Vec3::new(1.0, 0.25, 5.0), epsilon = 1e-6);
    }
}
