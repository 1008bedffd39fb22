//! Per-tick motion integration
//!
//! One pass over the registry advancing every animated angle. All increments
//! are fixed per-tick steps scaled by the speed modifier; nothing here uses
//! wall-clock delta time, so slowing the frame rate slows the simulation.

use orrery_math::Vec3;

use crate::body::CORONA_BASE_SCALE;
use crate::registry::BodyRegistry;
use crate::state::SimState;

/// Per-tick ring spin increment (before the speed modifier)
pub const RING_SPIN_STEP: f32 = 0.025;
/// Camera distance inside which coronas pulse and rings spin
pub const NEAR_EFFECT_DISTANCE: f32 = 100.0;

/// Advances orbital, rotational and decorative animation each tick
pub struct MotionIntegrator;

impl MotionIntegrator {
    /// Advance every body and the belts by one tick
    ///
    /// The corona pulse runs even while paused: it is a purely decorative
    /// shimmer driven by wall time, not simulation time.
    pub fn advance(
        registry: &mut BodyRegistry,
        state: &SimState,
        camera_position: Vec3,
        wall_ms: f64,
    ) {
        let keys: Vec<_> = registry.keys().collect();
        for key in keys {
            let distance = registry
                .world_position(key)
                .map(|p| camera_position.distance(p));
            let Some(body) = registry.get_mut(key) else {
                continue;
            };
            let near = distance.is_some_and(|d| d < NEAR_EFFECT_DISTANCE);

            if body.corona && near {
                body.corona_scale =
                    CORONA_BASE_SCALE + (wall_ms * 0.002).sin() as f32;
            }

            if state.paused {
                continue;
            }

            if let Some(speed) = body.rotation_speed {
                body.spin += speed * state.speed_modifier;
            }
            if let (Some(speed), Some(pivot)) = (body.orbit_speed, body.pivot.as_mut()) {
                pivot.angle += speed * state.speed_modifier;
            }
            if let Some(speed) = body.precession_speed {
                body.spin += speed * state.speed_modifier;
            }
            if body.rings.is_some() && near {
                body.ring_spin += RING_SPIN_STEP * state.speed_modifier;
            }
        }

        if !state.paused {
            if let Some(belts) = registry.belts_mut() {
                belts.advance(state.speed_modifier);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belts::{BeltSystem, BELT_ROTATION_STEP};
    use crate::descriptor::{BodyClass, BodyDescriptor, RingSpec};
    use crate::CelestialBody;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn planet() -> BodyDescriptor {
        BodyDescriptor::new("earth", BodyClass::Planet, 1.0, "earth.jpg")
            .with_distance(20.0)
            .with_rotation_speed(0.02)
            .with_orbit_speed(0.01)
    }

    fn running() -> SimState {
        SimState::new()
    }

    #[test]
    fn test_spin_and_orbit_advance() {
        let mut registry = BodyRegistry::new();
        let key = registry.add_body(CelestialBody::from_descriptor(&planet(), None));

        MotionIntegrator::advance(&mut registry, &running(), Vec3::ZERO, 0.0);

        let body = registry.get(key).unwrap();
        assert!((body.spin - 0.02).abs() < 1e-7);
        assert!((body.pivot.unwrap().angle - 0.01).abs() < 1e-7);
    }

    #[test]
    fn test_speed_modifier_scales_increments() {
        let mut registry = BodyRegistry::new();
        let key = registry.add_body(CelestialBody::from_descriptor(&planet(), None));
        let state = SimState {
            speed_modifier: 4.0,
            ..SimState::new()
        };

        MotionIntegrator::advance(&mut registry, &state, Vec3::ZERO, 0.0);

        let body = registry.get(key).unwrap();
        assert!((body.spin - 0.08).abs() < 1e-6);
        assert!((body.pivot.unwrap().angle - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_pause_freezes_motion_but_not_corona() {
        let mut registry = BodyRegistry::new();
        let sun = registry.add_body(CelestialBody::from_descriptor(
            &BodyDescriptor::new("sun", BodyClass::Star, 5.0, "sun.jpg")
                .with_rotation_speed(0.0005)
                .with_corona(),
            None,
        ));
        let state = SimState {
            paused: true,
            ..SimState::new()
        };

        // Wall time picked so sin() is near 1
        let wall_ms = (std::f64::consts::FRAC_PI_2) / 0.002;
        MotionIntegrator::advance(&mut registry, &state, Vec3::ZERO, wall_ms);

        let body = registry.get(sun).unwrap();
        assert_eq!(body.spin, 0.0);
        assert!((body.corona_scale - (CORONA_BASE_SCALE + 1.0)).abs() < 1e-4);
    }

    #[test]
    fn test_corona_static_when_camera_far() {
        let mut registry = BodyRegistry::new();
        let sun = registry.add_body(CelestialBody::from_descriptor(
            &BodyDescriptor::new("sun", BodyClass::Star, 5.0, "sun.jpg").with_corona(),
            None,
        ));

        let wall_ms = (std::f64::consts::FRAC_PI_2) / 0.002;
        MotionIntegrator::advance(
            &mut registry,
            &running(),
            Vec3::new(0.0, 0.0, 500.0),
            wall_ms,
        );

        assert_eq!(registry.get(sun).unwrap().corona_scale, CORONA_BASE_SCALE);
    }

    #[test]
    fn test_ring_spin_gated_by_distance() {
        let mut registry = BodyRegistry::new();
        let saturn = registry.add_body(CelestialBody::from_descriptor(
            &BodyDescriptor::new("saturn", BodyClass::Planet, 2.0, "saturn.jpg")
                .with_distance(50.0)
                .with_rings(RingSpec {
                    texture: "rings.png".into(),
                    inner_radius: 2.5,
                    outer_radius: 4.0,
                    tilt: 0.0,
                }),
            None,
        ));

        // Camera at origin, body at 50 units: near
        MotionIntegrator::advance(&mut registry, &running(), Vec3::ZERO, 0.0);
        assert!((registry.get(saturn).unwrap().ring_spin - RING_SPIN_STEP).abs() < 1e-7);

        // Camera far away: ring spin frozen
        MotionIntegrator::advance(&mut registry, &running(), Vec3::new(0.0, 0.0, 2000.0), 0.0);
        assert!((registry.get(saturn).unwrap().ring_spin - RING_SPIN_STEP).abs() < 1e-7);
    }

    #[test]
    fn test_precession_adds_to_spin() {
        let mut registry = BodyRegistry::new();
        let key = registry.add_body(CelestialBody::from_descriptor(
            &planet().with_axial_tilt(0.4).with_precession_speed(0.003),
            None,
        ));
        // Starts with one precession step already applied
        assert_eq!(registry.get(key).unwrap().spin, 0.003);

        MotionIntegrator::advance(&mut registry, &running(), Vec3::ZERO, 0.0);
        let body = registry.get(key).unwrap();
        assert!((body.spin - (0.003 + 0.02 + 0.003)).abs() < 1e-6);
    }

    #[test]
    fn test_belts_advance_once_per_tick() {
        let mut registry = BodyRegistry::new();
        registry.set_belts(BeltSystem::generate(&mut StdRng::seed_from_u64(1)));

        MotionIntegrator::advance(&mut registry, &running(), Vec3::ZERO, 0.0);
        let belts = registry.belts().unwrap();
        assert_eq!(belts.asteroids.rotation, BELT_ROTATION_STEP);
        assert_eq!(belts.kuiper.rotation, BELT_ROTATION_STEP);
    }

    #[test]
    fn test_belts_frozen_while_paused() {
        let mut registry = BodyRegistry::new();
        registry.set_belts(BeltSystem::generate(&mut StdRng::seed_from_u64(1)));
        let state = SimState {
            paused: true,
            ..SimState::new()
        };

        MotionIntegrator::advance(&mut registry, &state, Vec3::ZERO, 0.0);
        assert_eq!(registry.belts().unwrap().asteroids.rotation, 0.0);
    }
}
