//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene pipeline, mesh cache and cameras
//! - Background ship-model loading
//! - Frame rendering

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::window::Window;

use orrery_core::{BodyClass, BodyRegistry, SimState};
use orrery_math::Vec3;
use orrery_render::{
    CockpitCamera, ModelLoader, OrbitCamera, RenderContext, ScenePipeline, SceneUniforms,
    SceneVisuals, ShipPose,
};

use crate::config::{CameraConfig, RenderingConfig, ShipConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Context creation failed (no adapter, device request, surface)
    InitFailed(String),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::InitFailed(msg) => write!(f, "Render init failed: {}", msg),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ScenePipeline,
    visuals: SceneVisuals,
    model_loader: ModelLoader,
    pub orbit_camera: OrbitCamera,
    pub cockpit_camera: CockpitCamera,
    render_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: &CameraConfig,
        ship_config: &ShipConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))
            .map_err(|e| RenderError::InitFailed(e.to_string()))?;

        let mut pipeline = ScenePipeline::new(&context.device, context.config.format);
        let size = context.size();
        pipeline.ensure_depth_texture(&context.device, size.width, size.height);

        let mut rng = StdRng::seed_from_u64(render_config.scatter_seed);
        let visuals = SceneVisuals::new(&context.device, &mut rng);

        let mut orbit_camera = OrbitCamera::new();
        orbit_camera.position = Vec3::new(
            camera_config.start_position[0],
            camera_config.start_position[1],
            camera_config.start_position[2],
        );
        orbit_camera.fov_y = camera_config.fov.to_radians();

        let mut cockpit_camera = CockpitCamera::new();
        cockpit_camera.fov_y = camera_config.cockpit_fov.to_radians();

        // The ship model arrives whenever the worker finishes; the cone
        // placeholder draws until then
        let model_loader = ModelLoader::new();
        model_loader.load_async(&ship_config.model_path, "ship");

        Ok(Self {
            context,
            pipeline,
            visuals,
            model_loader,
            orbit_camera,
            cockpit_camera,
            render_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline
            .ensure_depth_texture(&self.context.device, width, height);
    }

    /// Apply finished background model loads
    ///
    /// A failed load is not fatal; the placeholder mesh keeps drawing.
    fn poll_assets(&mut self) {
        for result in self.model_loader.poll_all() {
            match result.result {
                Ok(mesh) => {
                    log::info!("Model '{}' loaded", result.model_name);
                    self.visuals.set_ship_mesh(&self.context.device, &mesh);
                }
                Err(e) => {
                    log::warn!("Model '{}' failed to load: {}", result.model_name, e);
                }
            }
        }
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        registry: &mut BodyRegistry,
        state: &SimState,
        ship: ShipPose,
    ) -> Result<(), RenderError> {
        self.poll_assets();
        self.visuals.retain_live(registry);
        self.visuals
            .prepare(&self.context.device, registry, state, ship);

        let aspect = self.context.aspect_ratio();
        let view_proj = if state.free_roam {
            self.cockpit_camera
                .view_projection(ship.position, ship.orientation, aspect)
        } else {
            self.orbit_camera.view_projection(aspect)
        };

        // The sun lights the scene from wherever it sits (the origin,
        // barring an exotic catalog)
        let light = registry
            .keys()
            .find(|&key| {
                registry
                    .get(key)
                    .is_some_and(|body| body.class == BodyClass::Star)
            })
            .and_then(|key| registry.world_position(key))
            .unwrap_or(Vec3::ZERO);

        let uniforms = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            light_position: [light.x, light.y, light.z],
            _padding: 0.0,
            ambient_strength: self.render_config.ambient_strength,
            diffuse_strength: self.render_config.diffuse_strength,
            _padding2: [0.0; 2],
        };
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        let bg = &self.render_config.background_color;
        let batches = self.visuals.batches();
        self.pipeline
            .render(
                &mut encoder,
                &view,
                &batches,
                wgpu::Color {
                    r: bg[0] as f64,
                    g: bg[1] as f64,
                    b: bg[2] as f64,
                    a: bg[3] as f64,
                },
            )
            .map_err(|e| RenderError::Other(e.to_string()))?;
        drop(batches);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        let size = self.context.size();
        (size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }
}
