//! Shortest-path angular interpolation.

use std::f32::consts::{PI, TAU};

/// Move `current` toward `target` by `rate` along the shorter arc.
///
/// The result is not wrapped into `[0, 2π)`; callers only ever compare it
/// modulo a full turn.
pub fn lerp_angle(current: f32, target: f32, rate: f32) -> f32 {
    let mut delta = (target - current) % TAU;
    if delta > PI {
        delta -= TAU;
    }
    if delta < -PI {
        delta += TAU;
    }
    current + delta * rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::approx;

    fn same_angle(a: f32, b: f32) -> bool {
        let d = (a - b).rem_euclid(TAU);
        approx(d, 0.0) || approx(d, TAU)
    }

    #[test]
    fn test_full_rate_reaches_target() {
        for (a, b) in [(0.0, 1.0), (0.1, 6.2), (6.2, 0.1), (-3.0, 3.0), (0.0, 10.0 * PI + 0.5)] {
            assert!(same_angle(lerp_angle(a, b, 1.0), b), "{a} -> {b}");
        }
    }

    #[test]
    fn test_same_angle_is_fixed() {
        for rate in [0.0, 0.1, 0.5, 1.0] {
            assert!(approx(lerp_angle(1.25, 1.25, rate), 1.25));
        }
    }

    #[test]
    fn test_takes_short_way_across_zero() {
        // From just below a full turn to just above zero: step forward, not back.
        let next = lerp_angle(TAU - 0.1, 0.1, 0.5);
        assert!(approx(next, TAU));

        let back = lerp_angle(0.1, TAU - 0.1, 0.5);
        assert!(approx(back, 0.0));
    }
}
