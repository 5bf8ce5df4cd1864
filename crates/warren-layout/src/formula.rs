//! Pure force-magnitude formulas.
//!
//! Each function maps a signed scalar distance (or overlap depth) to a
//! signed force magnitude. The sign convention follows the distance: a
//! positive distance produces a positive force, pushing along the axis the
//! distance was measured on. Producers combine these scalars with geometric
//! directions to build force vectors.

use warren_core::EPSILON;

/// `signum` that treats magnitudes below [`EPSILON`] as zero.
pub(crate) fn sign(value: f64) -> f64 {
    if value.abs() < EPSILON {
        0.0
    } else {
        value.signum()
    }
}

/// Attraction across a gap between two separated rectangles.
///
/// With `x = |distance|`: the magnitude is `3` at `x ≈ 0`, falls off
/// linearly as `3 − x`, and vanishes for gaps of `3` or more. The result is
/// signed by the distance; an exactly zero distance has no direction and
/// produces no force.
pub fn normal_force(distance: f64) -> f64 {
    let x = distance.abs();
    let magnitude = if x >= 3.0 {
        0.0
    } else if x <= EPSILON {
        3.0
    } else {
        3.0 - x
    };
    magnitude * sign(distance)
}

/// Repulsion for overlapping or out-of-bounds rectangles.
///
/// The overlap depth is amplified (`3 × depth`) so that deep overlaps
/// separate quickly, and the `normal_force(sign)` term adds a `±2` floor so
/// that even shallow overlaps receive a meaningful push.
pub fn overlap_force(distance: f64) -> f64 {
    3.0 * (distance + normal_force(sign(distance)))
}

/// Separation push for the degenerate zero-distance collision.
///
/// Only the legacy side-to-side producer uses this; the directed-distance
/// producer resolves coincident centers with a random opposing-force pair
/// instead.
pub fn collide_force(sign: f64, fragment: f64) -> f64 {
    sign / fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normal_force_is_zero_at_zero_distance() {
        assert_eq!(normal_force(0.0), 0.0);
    }

    #[test]
    fn normal_force_vanishes_past_three() {
        assert_eq!(normal_force(3.0), 0.0);
        assert_eq!(normal_force(10.0), 0.0);
        assert_eq!(normal_force(-10.0), 0.0);
    }

    #[test]
    fn normal_force_linear_region() {
        assert!((normal_force(1.0) - 2.0).abs() < 1e-9);
        assert!((normal_force(0.01) - 2.99).abs() < 1e-9);
        assert!((normal_force(-0.01) + 2.99).abs() < 1e-9);
        assert!((normal_force(-1.0) + 2.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_force_amplifies_depth_with_floor() {
        // 3 * (d ± 2)
        assert!((overlap_force(1.0) - 9.0).abs() < 1e-9);
        assert!((overlap_force(0.5) - 7.5).abs() < 1e-9);
        assert!((overlap_force(-1.0) + 9.0).abs() < 1e-9);
    }

    #[test]
    fn collide_force_scales_with_fragment() {
        assert!((collide_force(1.0, 0.1) - 10.0).abs() < 1e-9);
        assert!((collide_force(-1.0, 0.1) + 10.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn normal_force_magnitude_decreases_with_distance(
            a in 1e-6..3.0f64,
            b in 1e-6..3.0f64,
        ) {
            let (near, far) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(normal_force(near).abs() >= normal_force(far).abs());
        }

        #[test]
        fn normal_force_is_odd(d in -10.0..10.0f64) {
            prop_assert!((normal_force(d) + normal_force(-d)).abs() < 1e-9);
        }

        #[test]
        fn normal_force_is_zero_outside_influence(d in 3.0..1e6f64) {
            prop_assert_eq!(normal_force(d), 0.0);
            prop_assert_eq!(normal_force(-d), 0.0);
        }
    }
}
