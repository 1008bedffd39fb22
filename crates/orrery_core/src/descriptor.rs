//! Celestial body descriptors
//!
//! A [`BodyDescriptor`] is the serializable, immutable description of one
//! celestial entity as it appears in the catalog file. Every optional field
//! gates a feature: a missing field means "feature absent", never an error.

use orrery_math::Vec3;
use serde::{Deserialize, Serialize};

/// What kind of body a descriptor describes
///
/// Moons and mission objects nest recursively under their parent via
/// [`BodyDescriptor::satellites`]; the class tag decides the special-case
/// behavior (moons slow the simulation when followed, mission objects orbit
/// at a fixed offset and never show an info pane).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyClass {
    Star,
    Planet,
    Moon,
    MissionObject,
}

/// Planetary ring description
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RingSpec {
    /// Texture reference (resolved by the external asset layer)
    pub texture: String,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Extra tilt of the ring plane in radians
    #[serde(default)]
    pub tilt: f32,
}

/// Textual metadata consumed only by the info-pane presentation layer
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InfoText {
    #[serde(default)]
    pub status: Option<String>,
    /// Diameter in kilometers
    #[serde(default)]
    pub diameter_km: Option<f32>,
    /// Distance from the sun in millions of kilometers
    #[serde(default)]
    pub distance_from_sun: Option<f32>,
    /// Distance from the parent planet in millions of kilometers (moons)
    #[serde(default)]
    pub distance_from_planet: Option<f32>,
    /// Orbital period in earth days
    #[serde(default)]
    pub orbit_days: Option<f32>,
    #[serde(default)]
    pub rotation_period: Option<String>,
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub atmosphere: Option<String>,
    #[serde(default)]
    pub moon_count: Option<u32>,
    #[serde(default)]
    pub fun_fact: Option<String>,
}

/// Immutable descriptor for one celestial body
///
/// Loaded from the catalog; satellites (moons, stations) nest recursively.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    pub class: BodyClass,
    /// Physical radius in scene units
    pub size: f32,
    /// Orbital radius around the parent; absent for the central star
    #[serde(default)]
    pub distance: Option<f32>,
    /// Self-rotation increment in radians per tick
    #[serde(default)]
    pub rotation_speed: Option<f32>,
    /// Orbital increment in radians per tick
    #[serde(default)]
    pub orbit_speed: Option<f32>,
    /// Extra self-rotation increment in radians per tick
    #[serde(default)]
    pub precession_speed: Option<f32>,
    /// Axial tilt in radians
    #[serde(default)]
    pub axial_tilt: Option<f32>,
    /// Tilt of the orbital plane in radians
    #[serde(default)]
    pub orbital_tilt: Option<f32>,
    /// Texture reference (resolved by the external asset layer)
    pub texture: String,
    /// Pulsing glow sprite around the body (the star)
    #[serde(default)]
    pub corona: bool,
    /// Atmosphere sprite texture reference
    #[serde(default)]
    pub atmosphere: Option<String>,
    #[serde(default)]
    pub rings: Option<RingSpec>,
    /// Draw a ring marking the orbital path
    #[serde(default)]
    pub trail: bool,
    /// Fixed positional offset of the orbital plane (mission objects)
    #[serde(default)]
    pub orbit_offset: Option<Vec3>,
    /// Child bodies orbiting this one
    #[serde(default)]
    pub satellites: Vec<BodyDescriptor>,
    #[serde(default)]
    pub info: InfoText,
}

impl BodyDescriptor {
    /// Create a minimal descriptor; optional features default to absent
    pub fn new(
        name: impl Into<String>,
        class: BodyClass,
        size: f32,
        texture: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            size,
            distance: None,
            rotation_speed: None,
            orbit_speed: None,
            precession_speed: None,
            axial_tilt: None,
            orbital_tilt: None,
            texture: texture.into(),
            corona: false,
            atmosphere: None,
            rings: None,
            trail: false,
            orbit_offset: None,
            satellites: Vec::new(),
            info: InfoText::default(),
        }
    }

    /// Builder: set orbital distance
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Builder: set orbit speed (radians per tick)
    pub fn with_orbit_speed(mut self, speed: f32) -> Self {
        self.orbit_speed = Some(speed);
        self
    }

    /// Builder: set self-rotation speed (radians per tick)
    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = Some(speed);
        self
    }

    /// Builder: set precession speed (radians per tick)
    pub fn with_precession_speed(mut self, speed: f32) -> Self {
        self.precession_speed = Some(speed);
        self
    }

    /// Builder: set axial tilt (radians)
    pub fn with_axial_tilt(mut self, tilt: f32) -> Self {
        self.axial_tilt = Some(tilt);
        self
    }

    /// Builder: set orbital plane tilt (radians)
    pub fn with_orbital_tilt(mut self, tilt: f32) -> Self {
        self.orbital_tilt = Some(tilt);
        self
    }

    /// Builder: enable the corona glow
    pub fn with_corona(mut self) -> Self {
        self.corona = true;
        self
    }

    /// Builder: attach an atmosphere haze
    pub fn with_atmosphere(mut self, texture: impl Into<String>) -> Self {
        self.atmosphere = Some(texture.into());
        self
    }

    /// Builder: enable the orbital trail
    pub fn with_trail(mut self) -> Self {
        self.trail = true;
        self
    }

    /// Builder: attach rings
    pub fn with_rings(mut self, rings: RingSpec) -> Self {
        self.rings = Some(rings);
        self
    }

    /// Builder: add a satellite
    pub fn with_satellite(mut self, satellite: BodyDescriptor) -> Self {
        self.satellites.push(satellite);
        self
    }

    /// Builder: set the mission-object orbit offset
    pub fn with_orbit_offset(mut self, offset: Vec3) -> Self {
        self.orbit_offset = Some(offset);
        self
    }

    /// Whether this body orbits its parent (has an orbital distance)
    #[inline]
    pub fn orbits(&self) -> bool {
        self.distance.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_descriptor() {
        let d = BodyDescriptor::new("sun", BodyClass::Star, 5.0, "sun.jpg");
        assert!(!d.orbits());
        assert!(d.satellites.is_empty());
        assert!(!d.corona);
        assert!(d.rotation_speed.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let moon = BodyDescriptor::new("moon", BodyClass::Moon, 0.3, "moon.jpg")
            .with_distance(2.0)
            .with_orbit_speed(0.05);
        let d = BodyDescriptor::new("earth", BodyClass::Planet, 1.0, "earth.jpg")
            .with_distance(20.0)
            .with_orbit_speed(0.01)
            .with_rotation_speed(0.02)
            .with_trail()
            .with_satellite(moon);

        assert!(d.orbits());
        assert!(d.trail);
        assert_eq!(d.satellites.len(), 1);
        assert_eq!(d.satellites[0].class, BodyClass::Moon);
    }

    #[test]
    fn test_ring_spec_default_tilt() {
        let ron = r#"(texture: "rings.png", inner_radius: 1.5, outer_radius: 2.5)"#;
        let spec: RingSpec = ron::from_str(ron).unwrap();
        assert_eq!(spec.tilt, 0.0);
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        // Optional fields gate features; absence is never an error
        let ron = r#"(
            name: "mars",
            class: Planet,
            size: 0.8,
            texture: "mars.jpg",
        )"#;
        let d: BodyDescriptor = ron::from_str(ron).unwrap();
        assert_eq!(d.name, "mars");
        assert!(d.distance.is_none());
        assert!(d.rings.is_none());
        assert!(!d.trail);
    }
}
