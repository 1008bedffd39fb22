//! Asteroid and Kuiper belts
//!
//! Each belt is a large instanced point cloud: per-instance transforms are
//! seeded randomly on an annulus once at construction and never change. The
//! only mutation after that is the whole-system rotation applied per tick.

use orrery_math::Vec3;
use rand::Rng;

/// Per-tick belt rotation increment in radians (before the speed modifier)
pub const BELT_ROTATION_STEP: f32 = 0.0005;

/// One instanced belt particle transform, fixed at construction
#[derive(Clone, Copy, Debug)]
pub struct BeltInstance {
    pub position: Vec3,
    /// Random Euler rotation (radians, applied X then Y then Z)
    pub rotation: Vec3,
}

/// A single instanced belt
pub struct Belt {
    instances: Vec<BeltInstance>,
    /// Whole-belt rotation about the vertical axis
    pub rotation: f32,
    /// Radius of each particle sphere
    pub particle_size: f32,
}

impl Belt {
    /// Seed `count` particles on an annulus between the two radii
    pub fn generate(
        rng: &mut impl Rng,
        count: usize,
        inner_radius: f32,
        outer_radius: f32,
        vertical_spread: f32,
        particle_size: f32,
    ) -> Self {
        let mut instances = Vec::with_capacity(count);
        for _ in 0..count {
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let radius = inner_radius + rng.gen::<f32>() * (outer_radius - inner_radius);
            let position = Vec3::new(
                angle.cos() * radius,
                (rng.gen::<f32>() - 0.5) * vertical_spread,
                angle.sin() * radius,
            );
            let rotation = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
            instances.push(BeltInstance { position, rotation });
        }

        Self {
            instances,
            rotation: 0.0,
            particle_size,
        }
    }

    /// The immutable per-particle transforms
    pub fn instances(&self) -> &[BeltInstance] {
        &self.instances
    }
}

/// The asteroid belt and the Kuiper belt together
pub struct BeltSystem {
    pub asteroids: Belt,
    pub kuiper: Belt,
}

impl BeltSystem {
    /// Generate both belts with the original scene parameters
    pub fn generate(rng: &mut impl Rng) -> Self {
        Self {
            asteroids: Belt::generate(rng, 500, 32.0, 45.0, 5.0, 0.05),
            kuiper: Belt::generate(rng, 200, 460.0, 960.0, 15.0, 0.5),
        }
    }

    /// Advance both belts by one tick
    ///
    /// Pause gating is the integrator's responsibility, not the belt's.
    pub fn advance(&mut self, speed_modifier: f32) {
        self.asteroids.rotation += BELT_ROTATION_STEP * speed_modifier;
        self.kuiper.rotation += BELT_ROTATION_STEP * speed_modifier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_counts_and_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let system = BeltSystem::generate(&mut rng);
        assert_eq!(system.asteroids.instances().len(), 500);
        assert_eq!(system.kuiper.instances().len(), 200);

        for inst in system.asteroids.instances() {
            let planar = (inst.position.x * inst.position.x
                + inst.position.z * inst.position.z)
                .sqrt();
            assert!((32.0..=45.0).contains(&planar), "radius {}", planar);
            assert!(inst.position.y.abs() <= 2.5);
        }
    }

    #[test]
    fn test_advance_step() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut system = BeltSystem::generate(&mut rng);
        system.advance(1.0);
        assert_eq!(system.asteroids.rotation, BELT_ROTATION_STEP);
        assert_eq!(system.kuiper.rotation, BELT_ROTATION_STEP);

        system.advance(4.0);
        assert!((system.asteroids.rotation - BELT_ROTATION_STEP * 5.0).abs() < 1e-7);
    }

    #[test]
    fn test_same_seed_same_belt() {
        let a = BeltSystem::generate(&mut StdRng::seed_from_u64(42));
        let b = BeltSystem::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a.asteroids.instances()[0].position, b.asteroids.instances()[0].position);
        assert_eq!(a.kuiper.instances()[10].rotation, b.kuiper.instances()[10].rotation);
    }
}
