//! Noise-modulated radius and final numeral placement.

use glam::{Vec2, Vec3};
use halo_config::RingConfig;

use crate::noise::NoiseField;

/// Orbit radius of a numeral at `elapsed` seconds.
///
/// The field is sampled at the numeral's undeformed angle, so the wobble
/// pattern belongs to the numeral and ignores any push offset.
pub fn dynamic_radius(
    noise: &NoiseField,
    initial_angle: f32,
    offset: Vec2,
    elapsed: f64,
    ring: &RingConfig,
) -> f32 {
    let (sin, cos) = initial_angle.sin_cos();
    let value = noise.sample(
        (cos + offset.x) as f64,
        (sin + offset.y) as f64,
        elapsed * ring.noise_frequency as f64,
    ) as f32;
    ring.radius * (1.0 + value * ring.noise_amplitude)
}

/// Position in the ring's rotating frame.
pub fn orbit(radius: f32, angle: f32) -> Vec2 {
    Vec2::from_angle(angle) * radius
}

/// World position of a ring-local point for a ring centered at `center`
/// and rotated by `rotation`.
pub fn to_world(local: Vec2, rotation: f32, center: Vec3) -> Vec3 {
    center + Vec2::from_angle(rotation).rotate(local).extend(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::approx;
    use halo_core::RingKind;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_zero_amplitude_keeps_base_radius() {
        let ring = RingConfig {
            noise_amplitude: 0.0,
            ..RingConfig::for_ring(RingKind::Minutes)
        };
        let noise = NoiseField::new(3);
        for elapsed in [0.0, 1.5, 100.0] {
            let radius = dynamic_radius(&noise, 0.7, Vec2::splat(10.0), elapsed, &ring);
            assert!(approx(radius, ring.radius));
        }
    }

    #[test]
    fn test_radius_stays_within_amplitude() {
        let ring = RingConfig::for_ring(RingKind::Hours);
        let noise = NoiseField::new(11);
        for step in 0..200 {
            let radius = dynamic_radius(&noise, 1.0, Vec2::splat(20.0), step as f64 * 0.5, &ring);
            assert!(radius >= ring.radius * (1.0 - ring.noise_amplitude) - 1e-5);
            assert!(radius <= ring.radius * (1.0 + ring.noise_amplitude) + 1e-5);
        }
    }

    #[test]
    fn test_orbit_and_world() {
        let local = orbit(2.0, FRAC_PI_2);
        assert!(approx(local.x, 0.0) && approx(local.y, 2.0));

        let world = to_world(local, -FRAC_PI_2, Vec3::new(0.0, 0.0, -0.2));
        assert!(approx(world.x, 2.0) && approx(world.y, 0.0) && approx(world.z, -0.2));
    }
}
