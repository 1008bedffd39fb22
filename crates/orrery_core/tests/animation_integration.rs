//! Integration tests for the animation pipeline
//!
//! These tests verify the full catalog-registry-tick pipeline works correctly:
//! 1. Catalog parsing builds the expected body hierarchy
//! 2. The scheduler gates motion integration at the tick rate
//! 3. Pause, speed modifier and trail toggles flow through the registry
//! 4. LOD re-evaluation marks geometry dirty on tier changes

use orrery_core::{
    BodyClass, BodyRegistry, Catalog, CelestialBody, DetailTier, FrameScheduler,
    LodController, MotionIntegrator, SimState,
};
use orrery_math::Vec3;

const CATALOG: &str = r#"(
    bodies: [
        (
            name: "sun",
            class: Star,
            size: 5.0,
            texture: "sun.jpg",
            corona: true,
            rotation_speed: 0.0005,
        ),
        (
            name: "earth",
            class: Planet,
            size: 1.0,
            texture: "earth.jpg",
            distance: 20.0,
            orbit_speed: 0.01,
            rotation_speed: 0.02,
            axial_tilt: 0.41,
            precession_speed: 0.0001,
            trail: true,
            satellites: [
                (
                    name: "moon",
                    class: Moon,
                    size: 0.27,
                    texture: "moon.jpg",
                    distance: 2.0,
                    orbit_speed: 0.05,
                ),
            ],
        ),
        (
            name: "neptune",
            class: Planet,
            size: 1.8,
            texture: "neptune.jpg",
            distance: 900.0,
            orbit_speed: 0.0002,
            rotation_speed: 0.03,
            trail: true,
        ),
    ],
)"#;

/// Build a registry from the test catalog the way the scene builder does
fn build_registry() -> BodyRegistry {
    let catalog = Catalog::from_ron_str(CATALOG).expect("test catalog should parse");
    let mut registry = BodyRegistry::new();
    let mut tickets = Vec::new();

    for descriptor in &catalog.bodies {
        let key = registry.add_body(CelestialBody::from_descriptor(descriptor, None));
        if descriptor.trail {
            tickets.extend(registry.request_trail(key));
        }
        for satellite in &descriptor.satellites {
            let moon_key =
                registry.add_body(CelestialBody::from_descriptor(satellite, Some(key)));
            if satellite.trail {
                tickets.extend(registry.request_trail(moon_key));
            }
        }
    }
    for ticket in tickets {
        registry.attach_trail(ticket);
    }
    registry
}

// ==================== Catalog Tests ====================

#[test]
fn test_catalog_builds_hierarchy() {
    let registry = build_registry();
    assert_eq!(registry.len(), 4);

    let earth = registry.find_by_name("earth").unwrap();
    let moon = registry.find_by_name("moon").unwrap();
    assert_eq!(registry.get(moon).unwrap().parent, Some(earth));
    assert!(registry.get(earth).unwrap().trail.is_some());
    assert!(registry.get(moon).unwrap().trail.is_none());
}

#[test]
fn test_moon_position_relative_to_planet() {
    let registry = build_registry();
    let earth = registry.find_by_name("earth").unwrap();
    let moon = registry.find_by_name("moon").unwrap();

    let earth_pos = registry.world_position(earth).unwrap();
    let moon_pos = registry.world_position(moon).unwrap();
    let separation = earth_pos.distance(moon_pos);
    assert!((separation - 2.0).abs() < 1e-3, "separation {}", separation);
}

// ==================== Tick Pipeline Tests ====================

#[test]
fn test_scheduler_gates_integration() {
    let mut registry = build_registry();
    let mut scheduler = FrameScheduler::new();
    let state = SimState::new();
    let earth = registry.find_by_name("earth").unwrap();
    let start_angle = registry.get(earth).unwrap().pivot.unwrap().angle;

    // Render at ~240 fps for a simulated second: only ~60 ticks integrate
    let mut ticks = 0;
    let mut now = 0.0;
    while now < 1000.0 {
        if scheduler.poll(now).is_some() {
            MotionIntegrator::advance(&mut registry, &state, Vec3::ZERO, now);
            ticks += 1;
        }
        now += 4.2;
    }

    assert!((58..=62).contains(&ticks), "ticks {}", ticks);
    let advanced = registry.get(earth).unwrap().pivot.unwrap().angle - start_angle;
    assert!((advanced - 0.01 * ticks as f32).abs() < 1e-4);
}

#[test]
fn test_pause_and_resume() {
    let mut registry = build_registry();
    let mut state = SimState::new();
    let earth = registry.find_by_name("earth").unwrap();

    MotionIntegrator::advance(&mut registry, &state, Vec3::ZERO, 0.0);
    let after_one = registry.get(earth).unwrap().pivot.unwrap().angle;

    state.paused = true;
    MotionIntegrator::advance(&mut registry, &state, Vec3::ZERO, 16.7);
    assert_eq!(registry.get(earth).unwrap().pivot.unwrap().angle, after_one);

    state.paused = false;
    MotionIntegrator::advance(&mut registry, &state, Vec3::ZERO, 33.4);
    assert!(registry.get(earth).unwrap().pivot.unwrap().angle > after_one);
}

#[test]
fn test_trail_toggle_round_trip() {
    let mut registry = build_registry();
    let earth = registry.find_by_name("earth").unwrap();
    let neptune = registry.find_by_name("neptune").unwrap();

    registry.set_trails_visible(false);
    assert!(!registry.get(earth).unwrap().trail.unwrap().visible);
    assert!(!registry.get(neptune).unwrap().trail.unwrap().visible);

    registry.set_trails_visible(true);
    assert!(registry.get(earth).unwrap().trail.unwrap().visible);
}

// ==================== LOD Tests ====================

#[test]
fn test_lod_pass_demotes_distant_bodies() {
    let mut registry = build_registry();
    for key in registry.keys().collect::<Vec<_>>() {
        registry.get_mut(key).unwrap().clear_dirty();
    }

    // Camera near the sun: neptune at 900 units drops to medium
    LodController::update(&mut registry, Vec3::ZERO);

    let neptune = registry.find_by_name("neptune").unwrap();
    let body = registry.get(neptune).unwrap();
    assert_eq!(body.detail, DetailTier::Medium);
    assert!(body.is_dirty());

    let earth = registry.find_by_name("earth").unwrap();
    assert_eq!(registry.get(earth).unwrap().detail, DetailTier::Fine);
    assert!(!registry.get(earth).unwrap().is_dirty());
}

#[test]
fn test_lod_stable_across_repeat_passes() {
    let mut registry = build_registry();
    LodController::update(&mut registry, Vec3::ZERO);

    let neptune = registry.find_by_name("neptune").unwrap();
    registry.get_mut(neptune).unwrap().clear_dirty();

    // A second pass from the same viewpoint changes nothing
    LodController::update(&mut registry, Vec3::ZERO);
    assert!(!registry.get(neptune).unwrap().is_dirty());
}

// ==================== Teardown Tests ====================

#[test]
fn test_dispose_then_rebuild() {
    let mut registry = build_registry();
    let stale = registry.find_by_name("earth").unwrap();

    registry.dispose();
    assert!(registry.is_empty());

    // Rebuilding produces fresh keys; the stale one stays dead
    let catalog = Catalog::from_ron_str(CATALOG).unwrap();
    for descriptor in &catalog.bodies {
        registry.add_body(CelestialBody::from_descriptor(descriptor, None));
    }
    assert!(registry.get(stale).is_none());
}

#[test]
fn test_selection_by_catalog_index() {
    let registry = build_registry();
    let first = registry.key_at(0).unwrap();
    assert_eq!(registry.get(first).unwrap().class, BodyClass::Star);
    assert!(registry.key_at(99).is_none());
}
