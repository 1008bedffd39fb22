//! Per-body GPU state driven by the registry
//!
//! [`SceneVisuals`] owns every GPU mesh and rebuilds per-body geometry when
//! a body's dirty flags say so. Sphere surfaces are shared per detail tier;
//! rings and trails are sized per body and cached under the body's key, so
//! a disposed body's meshes drop out with its key.

use slotmap::SecondaryMap;
use wgpu::util::DeviceExt;

use orrery_core::{BodyFrame, BodyKey, BodyRegistry, CelestialBody, DetailTier, DirtyFlags, SimState};
use orrery_math::{Mat4, Quat, Vec3};

use crate::geometry;
use crate::pipeline::{DrawBatch, GpuMesh, Instance};

/// Segment count for belt particle spheres
const BELT_PARTICLE_SEGMENTS: u32 = 6;
/// Ship model scale
const SHIP_SCALE: f32 = 0.3;

/// Which cached mesh a prepared batch draws with
enum MeshSlot {
    Sphere(DetailTier),
    Ring(BodyKey),
    Trail(BodyKey),
    BeltParticle,
    Starfield,
    Ship,
}

struct PreparedBatch {
    slot: MeshSlot,
    buffer: wgpu::Buffer,
    count: u32,
}

/// Ship pose for this frame
#[derive(Clone, Copy, Debug)]
pub struct ShipPose {
    pub position: Vec3,
    pub orientation: Quat,
    pub visible: bool,
}

/// All GPU meshes and per-frame instance buffers for the scene
pub struct SceneVisuals {
    sphere_coarse: GpuMesh,
    sphere_medium: GpuMesh,
    sphere_fine: GpuMesh,
    rings: SecondaryMap<BodyKey, GpuMesh>,
    trails: SecondaryMap<BodyKey, GpuMesh>,
    belt_particle: GpuMesh,
    starfield: GpuMesh,
    ship: GpuMesh,
    prepared: Vec<PreparedBatch>,
}

impl SceneVisuals {
    /// Build the shared meshes
    ///
    /// The ship starts as a placeholder cone; see
    /// [`set_ship_mesh`](Self::set_ship_mesh).
    pub fn new(device: &wgpu::Device, rng: &mut impl rand::Rng) -> Self {
        let upload = |mesh: &geometry::MeshData| GpuMesh::upload(device, &mesh.vertices, &mesh.indices);

        Self {
            sphere_coarse: upload(&geometry::uv_sphere(DetailTier::Coarse.segments())),
            sphere_medium: upload(&geometry::uv_sphere(DetailTier::Medium.segments())),
            sphere_fine: upload(&geometry::uv_sphere(DetailTier::Fine.segments())),
            rings: SecondaryMap::new(),
            trails: SecondaryMap::new(),
            belt_particle: upload(&geometry::uv_sphere(BELT_PARTICLE_SEGMENTS)),
            starfield: upload(&geometry::starfield(rng)),
            ship: upload(&geometry::cone(0.5, 1.5, 12)),
            prepared: Vec::new(),
        }
    }

    /// Replace the placeholder ship mesh with a loaded model
    pub fn set_ship_mesh(&mut self, device: &wgpu::Device, mesh: &geometry::MeshData) {
        self.ship = GpuMesh::upload(device, &mesh.vertices, &mesh.indices);
    }

    /// Rebuild per-body meshes and instance buffers for this frame
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        registry: &mut BodyRegistry,
        state: &SimState,
        ship: ShipPose,
    ) {
        self.refresh_dirty(device, registry);
        self.prepared.clear();

        // Group sphere instances per tier
        let mut coarse = Vec::new();
        let mut medium = Vec::new();
        let mut fine = Vec::new();
        let mut single: Vec<(MeshSlot, Instance)> = Vec::new();

        let keys: Vec<_> = registry.keys().collect();
        for key in keys {
            let Some(frame) = registry.frame(key) else {
                continue;
            };
            let Some(body) = registry.get(key) else {
                continue;
            };

            let color = color_for(&body.texture);
            let emissive = if body.corona { 1.0 } else { 0.0 };
            let model = Mat4::from_translation_rotation_scale(
                frame.position,
                frame.mesh_rotation,
                body.size,
            );
            let instance = Instance::new(model.to_cols_array_2d(), color, emissive);
            match body.detail {
                DetailTier::Coarse => coarse.push(instance),
                DetailTier::Medium => medium.push(instance),
                DetailTier::Fine => fine.push(instance),
            }

            for shell in shell_instances(body, &frame, color) {
                single.push((MeshSlot::Sphere(DetailTier::Coarse), shell));
            }

            if let Some(spec) = &body.rings {
                let rotation = frame.mesh_rotation
                    * Quat::from_rotation_x(spec.tilt)
                    * Quat::from_rotation_y(body.ring_spin);
                let model = Mat4::from_translation_rotation_scale(
                    frame.position,
                    rotation,
                    body.size,
                );
                single.push((
                    MeshSlot::Ring(key),
                    Instance::new(model.to_cols_array_2d(), [0.8, 0.75, 0.6, 0.7], 0.0),
                ));
            }

            if let Some(trail) = body.trail {
                if trail.visible && state.trails_visible {
                    // The trail ring lies in the parent's orbital plane
                    let parent_frame = body
                        .parent
                        .and_then(|p| registry.frame(p))
                        .map(|f| (f.position, f.mesh_rotation))
                        .unwrap_or((Vec3::ZERO, Quat::IDENTITY));
                    let plane = parent_frame.1 * Quat::from_rotation_x(body.orbital_tilt);
                    let center = parent_frame.0 + parent_frame.1.rotate(body.orbit_offset);
                    let model = Mat4::from_translation_rotation_scale(
                        center,
                        plane,
                        1.0,
                    );
                    single.push((
                        MeshSlot::Trail(key),
                        Instance::new(model.to_cols_array_2d(), [0.5, 0.5, 0.55, 0.4], 1.0),
                    ));
                }
            }
        }

        // Belts
        if let Some(belts) = registry.belts() {
            for belt in [&belts.asteroids, &belts.kuiper] {
                let spin = Quat::from_rotation_y(belt.rotation);
                let instances: Vec<Instance> = belt
                    .instances()
                    .iter()
                    .map(|p| {
                        let position = spin.rotate(p.position);
                        let rotation = spin
                            * Quat::from_rotation_x(p.rotation.x)
                            * Quat::from_rotation_y(p.rotation.y)
                            * Quat::from_rotation_z(p.rotation.z);
                        let model = Mat4::from_translation_rotation_scale(
                            position,
                            rotation,
                            belt.particle_size,
                        );
                        Instance::new(model.to_cols_array_2d(), [0.45, 0.4, 0.35, 1.0], 0.0)
                    })
                    .collect();
                self.push_batch(device, MeshSlot::BeltParticle, &instances);
            }
        }

        // Starfield
        self.push_batch(
            device,
            MeshSlot::Starfield,
            &[Instance::new(
                Mat4::IDENTITY.to_cols_array_2d(),
                [1.0, 1.0, 1.0, 1.0],
                1.0,
            )],
        );

        // Ship
        if ship.visible {
            let model = Mat4::from_translation_rotation_scale(
                ship.position,
                ship.orientation,
                SHIP_SCALE,
            );
            self.push_batch(
                device,
                MeshSlot::Ship,
                &[Instance::new(model.to_cols_array_2d(), [0.7, 0.7, 0.75, 1.0], 0.0)],
            );
        }

        self.push_batch(device, MeshSlot::Sphere(DetailTier::Coarse), &coarse);
        self.push_batch(device, MeshSlot::Sphere(DetailTier::Medium), &medium);
        self.push_batch(device, MeshSlot::Sphere(DetailTier::Fine), &fine);
        for (slot, instance) in single {
            self.push_batch(device, slot, &[instance]);
        }
    }

    /// Rebuild ring and trail meshes for geometry-dirty bodies
    fn refresh_dirty(&mut self, device: &wgpu::Device, registry: &mut BodyRegistry) {
        let keys: Vec<_> = registry.keys().collect();
        for key in keys {
            let Some(body) = registry.get_mut(key) else {
                continue;
            };
            if !body.dirty_flags().contains(DirtyFlags::GEOMETRY) {
                continue;
            }

            if let Some(spec) = &body.rings {
                let mesh = geometry::annulus(spec.inner_radius, spec.outer_radius, 32);
                self.rings
                    .insert(key, GpuMesh::upload(device, &mesh.vertices, &mesh.indices));
            }
            if body.trail.is_some() {
                if let Some(distance) = body.distance {
                    let mesh = geometry::trail_annulus(distance);
                    self.trails
                        .insert(key, GpuMesh::upload(device, &mesh.vertices, &mesh.indices));
                }
            }
            body.clear_dirty();
        }
    }

    fn push_batch(&mut self, device: &wgpu::Device, slot: MeshSlot, instances: &[Instance]) {
        if instances.is_empty() {
            return;
        }
        // Trail meshes lag one frame behind ticket attachment; skip until
        // the next dirty refresh uploads them
        if !self.has_mesh(&slot) {
            return;
        }
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: bytemuck::cast_slice(instances),
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.prepared.push(PreparedBatch {
            slot,
            buffer,
            count: instances.len() as u32,
        });
    }

    fn has_mesh(&self, slot: &MeshSlot) -> bool {
        match slot {
            MeshSlot::Ring(key) => self.rings.contains_key(*key),
            MeshSlot::Trail(key) => self.trails.contains_key(*key),
            _ => true,
        }
    }

    fn mesh(&self, slot: &MeshSlot) -> &GpuMesh {
        match slot {
            MeshSlot::Sphere(DetailTier::Coarse) => &self.sphere_coarse,
            MeshSlot::Sphere(DetailTier::Medium) => &self.sphere_medium,
            MeshSlot::Sphere(DetailTier::Fine) => &self.sphere_fine,
            MeshSlot::Ring(key) => &self.rings[*key],
            MeshSlot::Trail(key) => &self.trails[*key],
            MeshSlot::BeltParticle => &self.belt_particle,
            MeshSlot::Starfield => &self.starfield,
            MeshSlot::Ship => &self.ship,
        }
    }

    /// Draw batches for the prepared frame
    pub fn batches(&self) -> Vec<DrawBatch<'_>> {
        self.prepared
            .iter()
            .map(|p| DrawBatch {
                mesh: self.mesh(&p.slot),
                instance_buffer: &p.buffer,
                instance_count: p.count,
            })
            .collect()
    }

    /// Drop cached meshes whose bodies no longer exist
    pub fn retain_live(&mut self, registry: &BodyRegistry) {
        self.rings.retain(|key, _| registry.get(key).is_some());
        self.trails.retain(|key, _| registry.get(key).is_some());
    }
}

/// Translucent shells drawn over a body's surface sphere
///
/// The corona is the emissive pulsing glow around the star; the atmosphere
/// is a lit haze skin sitting a fixed two units above the surface.
fn shell_instances(body: &CelestialBody, frame: &BodyFrame, color: [f32; 4]) -> Vec<Instance> {
    let mut shells = Vec::new();

    if body.corona {
        let model = Mat4::from_translation_rotation_scale(
            frame.position,
            Quat::IDENTITY,
            body.corona_scale,
        );
        shells.push(Instance::new(
            model.to_cols_array_2d(),
            [color[0], color[1], color[2], 0.25],
            1.0,
        ));
    }

    if body.atmosphere.is_some() {
        let model = Mat4::from_translation_rotation_scale(
            frame.position,
            Quat::IDENTITY,
            body.size + 2.0,
        );
        shells.push(Instance::new(
            model.to_cols_array_2d(),
            [0.55, 0.7, 1.0, 0.15],
            0.0,
        ));
    }

    shells
}

/// Stable pseudo-color derived from a texture name
///
/// Textures themselves are out of scope; each body gets a deterministic
/// hue from its texture string so the scene reads consistently between
/// runs.
pub fn color_for(texture: &str) -> [f32; 4] {
    let mut hash: u32 = 2166136261;
    for byte in texture.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(16777619);
    }

    let hue = (hash % 360) as f32;
    let (r, g, b) = hue_to_rgb(hue);
    // Keep mid saturation so nothing reads pure black or white
    [
        0.35 + 0.55 * r,
        0.35 + 0.55 * g,
        0.35 + 0.55 * b,
        1.0,
    ]
}

fn hue_to_rgb(hue: f32) -> (f32, f32, f32) {
    let h = hue / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    }
}
