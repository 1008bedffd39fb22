//! Body registry
//!
//! The [`BodyRegistry`] is the exclusive owner of every [`CelestialBody`] and
//! the [`BeltSystem`]. It computes world-space frames by walking each body's
//! parent chain: a moon's orbital plane hangs off its planet's mesh node, so
//! the planet's own spin carries the moon around with it.

use orrery_math::{Quat, Vec3};
use slotmap::SlotMap;

use crate::belts::BeltSystem;
use crate::body::{BodyKey, CelestialBody};

/// World-space frames for a body's scene-graph nodes
#[derive(Clone, Copy, Debug)]
pub struct BodyFrame {
    /// World position of the body's mesh
    pub position: Vec3,
    /// World rotation of the orbit pivot (used for camera framing offsets)
    pub pivot_rotation: Quat,
    /// World rotation of the mesh itself (pivot plus spin and axial tilt)
    pub mesh_rotation: Quat,
}

/// Pending trail attachment, resolved against the registry by key identity
///
/// Returned when a trail is requested at creation time; attaching through the
/// ticket cannot race scene construction the way an index-based deferred
/// callback could.
#[derive(Debug)]
pub struct TrailTicket {
    key: BodyKey,
}

impl TrailTicket {
    /// The body this ticket will attach a trail to
    #[inline]
    pub fn key(&self) -> BodyKey {
        self.key
    }
}

/// Container owning all celestial bodies and the belt system
#[derive(Default)]
pub struct BodyRegistry {
    bodies: SlotMap<BodyKey, CelestialBody>,
    /// Keys in catalog insertion order (selection by index, UI listings)
    order: Vec<BodyKey>,
    belts: Option<BeltSystem>,
}

impl BodyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body, returning its key
    pub fn add_body(&mut self, body: CelestialBody) -> BodyKey {
        let key = self.bodies.insert(body);
        self.order.push(key);
        key
    }

    /// Get a reference to a body by key
    pub fn get(&self, key: BodyKey) -> Option<&CelestialBody> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_mut(&mut self, key: BodyKey) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(key)
    }

    /// Number of bodies
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check whether the registry holds no renderable bodies
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Keys in catalog insertion order
    pub fn keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.order.iter().copied()
    }

    /// Key of the n-th body in catalog order
    pub fn key_at(&self, index: usize) -> Option<BodyKey> {
        self.order.get(index).copied()
    }

    /// Iterate over keys and bodies in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (BodyKey, &CelestialBody)> {
        self.order.iter().filter_map(move |&k| self.bodies.get(k).map(|b| (k, b)))
    }

    /// Look up a body by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<BodyKey> {
        self.iter()
            .find(|(_, b)| b.name.eq_ignore_ascii_case(name))
            .map(|(k, _)| k)
    }

    /// Request a trail attachment for a body
    ///
    /// Returns `None` if the body has no orbital distance (a trail marks the
    /// orbital path, so a non-orbiting body cannot have one).
    pub fn request_trail(&mut self, key: BodyKey) -> Option<TrailTicket> {
        let body = self.bodies.get(key)?;
        if body.orbits() {
            Some(TrailTicket { key })
        } else {
            None
        }
    }

    /// Resolve a trail ticket, attaching the trail to its body
    ///
    /// A ticket for a since-removed body is silently dropped.
    pub fn attach_trail(&mut self, ticket: TrailTicket) {
        if let Some(body) = self.bodies.get_mut(ticket.key) {
            body.trail = Some(crate::body::Trail::default());
        }
    }

    /// Set the visibility of every attached trail
    pub fn set_trails_visible(&mut self, visible: bool) {
        for body in self.bodies.values_mut() {
            if let Some(trail) = &mut body.trail {
                trail.visible = visible;
            }
        }
    }

    /// Install the belt system
    pub fn set_belts(&mut self, belts: BeltSystem) {
        self.belts = Some(belts);
    }

    /// Get the belt system, if installed
    pub fn belts(&self) -> Option<&BeltSystem> {
        self.belts.as_ref()
    }

    /// Get the belt system mutably
    pub fn belts_mut(&mut self) -> Option<&mut BeltSystem> {
        self.belts.as_mut()
    }

    /// Compute the world-space frames for a body's scene-graph nodes
    ///
    /// Walks the parent chain; returns `None` for a stale key.
    pub fn frame(&self, key: BodyKey) -> Option<BodyFrame> {
        let body = self.bodies.get(key)?;

        let (parent_pos, parent_rot) = match body.parent {
            Some(parent) => {
                let f = self.frame(parent)?;
                (f.position, f.mesh_rotation)
            }
            None => (Vec3::ZERO, Quat::IDENTITY),
        };

        // Orbital plane: tilt about X, offset for mission objects
        let plane_rot = parent_rot * Quat::from_rotation_x(body.orbital_tilt);
        let plane_pos = parent_pos + parent_rot.rotate(body.orbit_offset);

        let (position, pivot_rotation) = match (body.distance, &body.pivot) {
            (Some(distance), Some(pivot)) => {
                let pivot_rot = plane_rot * Quat::from_rotation_y(pivot.angle);
                let pos = plane_pos + pivot_rot.rotate(Vec3::new(distance, 0.0, 0.0));
                (pos, pivot_rot)
            }
            // No orbit: attach directly to the parent node
            _ => (parent_pos, parent_rot),
        };

        let mesh_rotation = pivot_rotation
            * Quat::from_rotation_y(body.spin)
            * Quat::from_rotation_z(body.axial_tilt);

        Some(BodyFrame {
            position,
            pivot_rotation,
            mesh_rotation,
        })
    }

    /// World position of a body's mesh
    pub fn world_position(&self, key: BodyKey) -> Option<Vec3> {
        self.frame(key).map(|f| f.position)
    }

    /// Release every body and belt
    ///
    /// After disposal the renderable set is empty; stale keys resolve to
    /// `None` everywhere.
    pub fn dispose(&mut self) {
        self.bodies.clear();
        self.order.clear();
        self.belts = None;
    }
}
