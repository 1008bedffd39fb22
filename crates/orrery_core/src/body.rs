//! Runtime celestial body state
//!
//! A [`CelestialBody`] is the mutable per-tick animation state derived from an
//! immutable [`BodyDescriptor`]. Sub-parts (corona, rings, trail) are typed
//! fields captured at construction, never discovered by runtime search.

use bitflags::bitflags;
use orrery_math::Vec3;
use slotmap::new_key_type;

use crate::descriptor::{BodyClass, BodyDescriptor, InfoText, RingSpec};

new_key_type! {
    /// Generational key identifying a body in the [`BodyRegistry`](crate::BodyRegistry)
    pub struct BodyKey;
}

bitflags! {
    /// Flags indicating which renderer-visible parts of a body have changed
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Surface geometry must be regenerated (detail tier changed)
        const GEOMETRY = 1 << 0;
    }
}

/// Tessellation tier for a body's surface sphere
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailTier {
    /// 8 segments, beyond 1500 units
    Coarse,
    /// 16 segments, 500 to 1500 units
    Medium,
    /// 32 segments, closer than 100 units
    Fine,
}

impl DetailTier {
    /// Sphere segment count for this tier
    #[inline]
    pub fn segments(self) -> u32 {
        match self {
            DetailTier::Coarse => 8,
            DetailTier::Medium => 16,
            DetailTier::Fine => 32,
        }
    }
}

/// Anchor node whose rotation is the body's angular position along its orbit
///
/// Distinct from the body's own spin. Present exactly when the body has an
/// orbital distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrbitPivot {
    /// Orbital angle in radians
    pub angle: f32,
}

/// Visual ring marking the orbital path
#[derive(Clone, Copy, Debug)]
pub struct Trail {
    pub visible: bool,
}

impl Default for Trail {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Default (and maximum) corona sprite scale
pub const CORONA_BASE_SCALE: f32 = 15.0;

/// One renderable celestial entity with its animation state
pub struct CelestialBody {
    pub name: String,
    pub class: BodyClass,
    /// Physical radius in scene units
    pub size: f32,
    pub texture: String,
    pub rotation_speed: Option<f32>,
    pub orbit_speed: Option<f32>,
    pub precession_speed: Option<f32>,
    /// Axial tilt in radians (0 when the descriptor omits it)
    pub axial_tilt: f32,
    /// Orbital plane tilt in radians
    pub orbital_tilt: f32,
    /// Orbital radius around the parent; `None` for the central star
    pub distance: Option<f32>,
    /// Fixed positional offset of the orbital plane (mission objects)
    pub orbit_offset: Vec3,
    pub corona: bool,
    pub atmosphere: Option<String>,
    pub rings: Option<RingSpec>,
    pub info: InfoText,
    /// Parent body; `None` for bodies attached directly to the scene
    pub parent: Option<BodyKey>,

    /// Self-rotation angle in radians
    pub spin: f32,
    /// Orbital anchor; invariant: `Some` exactly when `distance` is `Some`
    pub pivot: Option<OrbitPivot>,
    /// Ring sub-object spin angle
    pub ring_spin: f32,
    /// Current corona sprite scale (pulses near the camera)
    pub corona_scale: f32,
    /// Orbital path ring; attached via a registry ticket after creation
    pub trail: Option<Trail>,
    pub detail: DetailTier,
    dirty: DirtyFlags,
}

impl CelestialBody {
    /// Create a body from its descriptor
    ///
    /// The pivot is created exactly when the descriptor has a distance, so the
    /// pivot invariant holds by construction. The trail is not attached here;
    /// see [`BodyRegistry::request_trail`](crate::BodyRegistry::request_trail).
    pub fn from_descriptor(descriptor: &BodyDescriptor, parent: Option<BodyKey>) -> Self {
        // Tilted bodies start with their precession already applied once
        let spin = if descriptor.axial_tilt.is_some() {
            descriptor.precession_speed.unwrap_or(0.0)
        } else {
            0.0
        };

        Self {
            name: descriptor.name.clone(),
            class: descriptor.class,
            size: descriptor.size,
            texture: descriptor.texture.clone(),
            rotation_speed: descriptor.rotation_speed,
            orbit_speed: descriptor.orbit_speed,
            precession_speed: descriptor.precession_speed,
            axial_tilt: descriptor.axial_tilt.unwrap_or(0.0),
            orbital_tilt: descriptor.orbital_tilt.unwrap_or(0.0),
            distance: descriptor.distance,
            orbit_offset: descriptor.orbit_offset.unwrap_or(Vec3::ZERO),
            corona: descriptor.corona,
            atmosphere: descriptor.atmosphere.clone(),
            rings: descriptor.rings.clone(),
            info: descriptor.info.clone(),
            parent,
            spin,
            pivot: descriptor.orbits().then(OrbitPivot::default),
            ring_spin: 0.0,
            corona_scale: CORONA_BASE_SCALE,
            trail: None,
            detail: DetailTier::Fine,
            dirty: DirtyFlags::GEOMETRY,
        }
    }

    /// Whether this body orbits (has a pivot)
    #[inline]
    pub fn orbits(&self) -> bool {
        self.pivot.is_some()
    }

    /// Set the detail tier, marking geometry dirty only on an actual change
    pub fn set_detail(&mut self, tier: DetailTier) {
        if self.detail != tier {
            self.detail = tier;
            self.mark_dirty(DirtyFlags::GEOMETRY);
        }
    }

    /// Check if this body has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this body as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::BodyClass;

    fn planet() -> BodyDescriptor {
        BodyDescriptor::new("earth", BodyClass::Planet, 1.0, "earth.jpg")
            .with_distance(20.0)
            .with_orbit_speed(0.01)
    }

    #[test]
    fn test_pivot_invariant() {
        let with_distance = CelestialBody::from_descriptor(&planet(), None);
        assert!(with_distance.orbits());

        let star = BodyDescriptor::new("sun", BodyClass::Star, 5.0, "sun.jpg");
        let without_distance = CelestialBody::from_descriptor(&star, None);
        assert!(!without_distance.orbits());
    }

    #[test]
    fn test_new_body_starts_dirty() {
        let body = CelestialBody::from_descriptor(&planet(), None);
        assert!(body.is_dirty());
        assert!(body.dirty_flags().contains(DirtyFlags::GEOMETRY));
        assert_eq!(body.detail, DetailTier::Fine);
    }

    #[test]
    fn test_set_detail_marks_dirty_only_on_change() {
        let mut body = CelestialBody::from_descriptor(&planet(), None);
        body.clear_dirty();

        body.set_detail(DetailTier::Fine);
        assert!(!body.is_dirty());

        body.set_detail(DetailTier::Coarse);
        assert!(body.is_dirty());
        assert_eq!(body.detail.segments(), 8);
    }

    #[test]
    fn test_tilted_body_starts_with_precession() {
        let d = planet().with_axial_tilt(0.4).with_precession_speed(0.003);
        let body = CelestialBody::from_descriptor(&d, None);
        assert_eq!(body.spin, 0.003);
        assert_eq!(body.axial_tilt, 0.4);
    }

    #[test]
    fn test_tier_segments() {
        assert_eq!(DetailTier::Coarse.segments(), 8);
        assert_eq!(DetailTier::Medium.segments(), 16);
        assert_eq!(DetailTier::Fine.segments(), 32);
    }
}
