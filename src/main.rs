//! Orrery - interactive solar system visualization
//!
//! An animated solar system scene with an orbit camera, selection flights,
//! and a free-roam cockpit mode.

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use orrery::config::AppConfig;
use orrery::input::{InputAction, InputMapper};
use orrery::scene::SceneBuilder;
use orrery::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};

use orrery_core::BodyRegistry;
use orrery_render::ShipPose;

/// Main application state
struct App {
    config: AppConfig,
    registry: BodyRegistry,
    simulation: SimulationSystem,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
}

impl App {
    fn new() -> Self {
        // Load configuration
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        // Build the scene from the body catalog
        let registry = SceneBuilder::new()
            .with_catalog_file(&config.catalog.path)
            .unwrap_or_else(|e| {
                panic!("Failed to load catalog '{}': {}", config.catalog.path, e);
            })
            .with_belts(config.rendering.scatter_seed)
            .build();

        let simulation = SimulationSystem::new(&config.simulation, &config.ship, &config.camera);

        Self {
            config,
            registry,
            simulation,
            window: None,
            render: None,
        }
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::TogglePause => self.simulation.toggle_pause(),
            InputAction::ToggleTrails => self.simulation.toggle_trails(&mut self.registry),
            InputAction::ToggleFreeRoam => self.simulation.toggle_free_roam(&self.registry),
            InputAction::SpeedDown => self.simulation.adjust_speed(&self.registry, -1.0),
            InputAction::SpeedUp => self.simulation.adjust_speed(&self.registry, 1.0),
            InputAction::SelectBody(index) => {
                if let Some(render) = &self.render {
                    self.simulation
                        .select_body(&self.registry, &render.orbit_camera, index);
                }
            }
            InputAction::Deselect => self.simulation.deselect(&self.registry),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Exit => event_loop.exit(),
        }
    }

}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = WindowSystem::create(event_loop, &self.config.window)
                .expect("Failed to create window");

            let render = RenderSystem::new(
                window.window().clone(),
                self.config.rendering.clone(),
                &self.config.camera,
                &self.config.ship,
                self.config.window.vsync,
            )
            .expect("Failed to create render system");

            window.request_redraw();
            self.window = Some(window);
            self.render = Some(render);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let free_roam = self.simulation.state.free_roam;
                    if let Some(action) = InputMapper::map_keyboard(key, event.state, free_roam) {
                        self.handle_action(event_loop, action);
                    } else if free_roam {
                        self.simulation.ship.process_keyboard(key, event.state);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(render) = &mut self.render else {
                    return;
                };

                self.simulation
                    .update(&mut self.registry, &mut render.orbit_camera);

                if let Some(window) = &self.window {
                    let followed = self
                        .simulation
                        .state
                        .followed
                        .and_then(|key| self.registry.get(key))
                        .map(|body| body.name.as_str());
                    window.update_title(
                        self.simulation.state.paused,
                        self.simulation.state.speed_modifier,
                        followed,
                    );
                }

                let pose = ShipPose {
                    position: self.simulation.ship.position(),
                    orientation: self.simulation.ship.orientation(),
                    visible: self.simulation.state.free_roam,
                };
                match render.render_frame(&mut self.registry, &self.simulation.state, pose) {
                    Ok(()) => {}
                    Err(RenderError::SurfaceLost) => {
                        let (width, height) = render.size();
                        render.resize(width, height);
                    }
                    Err(RenderError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        event_loop.exit();
                        return;
                    }
                    Err(e) => {
                        log::warn!("Frame error: {}", e);
                    }
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Orrery");

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
