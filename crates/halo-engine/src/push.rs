//! Angular push of numerals away from the highlighted one.

use halo_config::PushConfig;

use crate::angle::lerp_angle;
use crate::ring::RingElement;

/// Signed index distance from `highlighted` to `index` on a ring of
/// `units` numerals, wrapped to the shorter way round.
pub fn wrapped_diff(index: usize, highlighted: usize, units: usize) -> i64 {
    let units = units as i64;
    let mut diff = index as i64 - highlighted as i64;
    if diff * 2 > units {
        diff -= units;
    } else if diff * 2 < -units {
        diff += units;
    }
    diff
}

/// Target angle offset for the numeral at `index`.
///
/// The push grows with how far the highlighted numeral has swelled past
/// its resting scale and shrinks geometrically with distance.
pub fn push_target(
    index: usize,
    highlighted: usize,
    units: usize,
    highlighted_scale: f32,
    push: &PushConfig,
) -> f32 {
    if index == highlighted {
        return 0.0;
    }
    let diff = wrapped_diff(index, highlighted, units);
    let distance = diff.unsigned_abs() as i32;
    let sign = diff.signum() as f32;
    let base = (highlighted_scale - 1.0).max(0.0) * push.factor;
    let decayed = base * push.decay.powi((distance - 1).max(0));
    -sign * decayed
}

/// Retarget every element of a ring and ease its offset toward the target.
///
/// `elements[highlighted]` must exist; ring construction guarantees it.
pub fn propagate(
    elements: &mut [RingElement],
    highlighted: usize,
    push: &PushConfig,
    offset_lerp: f32,
) {
    let units = elements.len();
    let highlighted_scale = elements[highlighted].spring.current;
    for element in elements.iter_mut() {
        element.target_offset =
            push_target(element.index, highlighted, units, highlighted_scale, push);
        element.current_offset =
            lerp_angle(element.current_offset, element.target_offset, offset_lerp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::approx;

    const PUSH: PushConfig = PushConfig {
        factor: 0.03,
        decay: 0.9,
    };

    #[test]
    fn test_wrapped_diff() {
        assert_eq!(wrapped_diff(59, 0, 60), -1);
        assert_eq!(wrapped_diff(1, 59, 60), 2);
        assert_eq!(wrapped_diff(30, 0, 60), 30);
        assert_eq!(wrapped_diff(0, 30, 60), -30);
        assert_eq!(wrapped_diff(5, 11, 12), -6);
        assert_eq!(wrapped_diff(3, 4, 12), -1);
    }

    #[test]
    fn test_highlighted_is_not_pushed() {
        assert_eq!(push_target(7, 7, 60, 3.0, &PUSH), 0.0);
    }

    #[test]
    fn test_symmetric_around_highlight() {
        for (units, highlighted) in [(60, 10), (60, 0), (12, 11), (24, 3)] {
            for distance in 1..units / 2 {
                let after = (highlighted + distance) % units;
                let before = (highlighted + units - distance) % units;
                let a = push_target(after, highlighted, units, 2.5, &PUSH);
                let b = push_target(before, highlighted, units, 2.5, &PUSH);
                assert!(approx(a, -b), "units {units} distance {distance}");
                assert!(a < 0.0);
            }
        }
    }

    #[test]
    fn test_decays_with_distance() {
        let mut previous = f32::INFINITY;
        for distance in 1..=30 {
            let magnitude = push_target(distance, 0, 60, 3.0, &PUSH).abs();
            assert!(magnitude <= previous);
            previous = magnitude;
        }
        assert!(approx(push_target(1, 0, 60, 3.0, &PUSH), -0.06));
        assert!(approx(push_target(2, 0, 60, 3.0, &PUSH), -0.054));
    }

    #[test]
    fn test_no_push_at_rest_scale() {
        for index in 1..60 {
            assert_eq!(push_target(index, 0, 60, 1.0, &PUSH), 0.0);
            assert_eq!(push_target(index, 0, 60, 0.5, &PUSH), 0.0);
        }
    }

    #[test]
    fn test_propagate_eases_offsets() {
        let mut elements: Vec<RingElement> =
            (0..12).map(|i| RingElement::new(i, i as u32, 0.0)).collect();
        elements[4].spring.current = 3.0;

        propagate(&mut elements, 4, &PUSH, 0.1);

        assert!(approx(elements[5].target_offset, -0.06));
        assert!(approx(elements[5].current_offset, -0.006));
        assert!(approx(elements[3].current_offset, 0.006));
        assert_eq!(elements[4].current_offset, 0.0);
    }
}
