//! Level-of-detail control
//!
//! Swaps each body's sphere tessellation based on camera distance. Tier
//! selection deliberately leaves a dead band between the fine and medium
//! thresholds so a body hovering near a boundary does not thrash its
//! geometry every evaluation.

use log::debug;
use orrery_math::Vec3;

use crate::body::DetailTier;
use crate::registry::BodyRegistry;

/// Distance below which a body is promoted to the fine tier
pub const FINE_DISTANCE: f32 = 100.0;
/// Distance above which a body drops to the medium tier
pub const MEDIUM_DISTANCE: f32 = 500.0;
/// Distance above which a body drops to the coarse tier
pub const COARSE_DISTANCE: f32 = 1500.0;

/// Periodic detail-tier controller
pub struct LodController;

impl LodController {
    /// Pick the tier a body at `distance` should switch to, if any
    ///
    /// Returns `None` when the body should keep its current tier, either
    /// because it already matches or because the distance falls in the
    /// dead band between [`FINE_DISTANCE`] and [`MEDIUM_DISTANCE`].
    pub fn select_tier(distance: f32, current: DetailTier) -> Option<DetailTier> {
        let target = if distance > COARSE_DISTANCE {
            DetailTier::Coarse
        } else if distance > MEDIUM_DISTANCE {
            DetailTier::Medium
        } else if distance < FINE_DISTANCE {
            DetailTier::Fine
        } else {
            return None;
        };

        (target != current).then_some(target)
    }

    /// Re-evaluate every body against the camera position
    ///
    /// Bodies whose tier changes are marked geometry-dirty; the renderer
    /// rebuilds their meshes on the next frame.
    pub fn update(registry: &mut BodyRegistry, camera_position: Vec3) {
        let keys: Vec<_> = registry.keys().collect();
        for key in keys {
            let Some(position) = registry.world_position(key) else {
                continue;
            };
            let distance = camera_position.distance(position);
            if let Some(body) = registry.get_mut(key) {
                if let Some(tier) = Self::select_tier(distance, body.detail) {
                    debug!("{}: detail {:?} at distance {:.0}", body.name, tier, distance);
                    body.set_detail(tier);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{BodyClass, BodyDescriptor};
    use crate::CelestialBody;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(
            LodController::select_tier(2000.0, DetailTier::Fine),
            Some(DetailTier::Coarse)
        );
        assert_eq!(
            LodController::select_tier(800.0, DetailTier::Fine),
            Some(DetailTier::Medium)
        );
        assert_eq!(
            LodController::select_tier(50.0, DetailTier::Coarse),
            Some(DetailTier::Fine)
        );
    }

    #[test]
    fn test_no_change_when_tier_matches() {
        assert_eq!(LodController::select_tier(2000.0, DetailTier::Coarse), None);
        assert_eq!(LodController::select_tier(800.0, DetailTier::Medium), None);
        assert_eq!(LodController::select_tier(50.0, DetailTier::Fine), None);
    }

    #[test]
    fn test_dead_band_keeps_current_tier() {
        // Between the fine and medium thresholds no transition fires in
        // either direction
        for tier in [DetailTier::Coarse, DetailTier::Medium, DetailTier::Fine] {
            assert_eq!(LodController::select_tier(100.0, tier), None);
            assert_eq!(LodController::select_tier(300.0, tier), None);
            assert_eq!(LodController::select_tier(500.0, tier), None);
        }
    }

    #[test]
    fn test_update_marks_changed_bodies_dirty() {
        let mut registry = BodyRegistry::new();
        let near = registry.add_body(CelestialBody::from_descriptor(
            &BodyDescriptor::new("near", BodyClass::Planet, 1.0, "a.jpg").with_distance(20.0),
            None,
        ));
        let far = registry.add_body(CelestialBody::from_descriptor(
            &BodyDescriptor::new("far", BodyClass::Planet, 1.0, "b.jpg").with_distance(900.0),
            None,
        ));
        registry.get_mut(near).unwrap().clear_dirty();
        registry.get_mut(far).unwrap().clear_dirty();

        LodController::update(&mut registry, Vec3::ZERO);

        // Near body already fine: untouched. Far body drops to medium.
        assert!(!registry.get(near).unwrap().is_dirty());
        let far_body = registry.get(far).unwrap();
        assert_eq!(far_body.detail, DetailTier::Medium);
        assert!(far_body.is_dirty());
    }
}
