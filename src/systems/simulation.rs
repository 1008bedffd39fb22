//! Animation simulation system
//!
//! Manages the per-frame simulation including:
//! - Tick scheduling at the fixed simulation rate
//! - Motion integration and periodic LOD re-evaluation
//! - Camera director and free-roam ship updates
//! - Semantic input actions (pause, trails, selection, speed)

use std::time::Instant;

use orrery_core::{
    speed_from_slider, BodyClass, BodyRegistry, FrameScheduler, LodController,
    MotionIntegrator, SimState,
};
use orrery_input::{CameraDirector, FollowFrame, ShipController};
use orrery_math::Vec3;
use orrery_render::OrbitCamera;

use crate::config::{CameraConfig, ShipConfig, SimulationConfig};

/// Manages the animation loop
pub struct SimulationSystem {
    scheduler: FrameScheduler,
    pub state: SimState,
    pub director: CameraDirector,
    pub ship: ShipController,
    speed_slider: f32,
    moon_speed_modifier: f32,
    start: Instant,
}

impl SimulationSystem {
    /// Create the simulation from config
    pub fn new(
        sim_config: &SimulationConfig,
        ship_config: &ShipConfig,
        camera_config: &CameraConfig,
    ) -> Self {
        let mut state = SimState::new();
        state.trails_visible = sim_config.trails_visible;
        state.speed_modifier = speed_from_slider(sim_config.speed_slider);

        let mut director = CameraDirector::new();
        director.duration_ms = camera_config.flight_duration as f64 * 1000.0;

        let ship = ShipController::new()
            .with_move_speed(ship_config.move_speed)
            .with_yaw_rate(ship_config.yaw_rate)
            .with_shake_amplitude(ship_config.shake_amplitude);

        Self {
            scheduler: FrameScheduler::new().with_tick_rate(sim_config.tick_rate),
            state,
            director,
            ship,
            speed_slider: sim_config.speed_slider,
            moon_speed_modifier: sim_config.moon_speed_modifier,
            start: Instant::now(),
        }
    }

    /// Milliseconds since startup
    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Run at most one simulation tick
    ///
    /// Called once per redraw; returns true when a tick actually ran. Render
    /// frames between ticks redraw the unchanged scene.
    pub fn update(&mut self, registry: &mut BodyRegistry, orbit_camera: &mut OrbitCamera) -> bool {
        let now = self.now_ms();
        let Some(tick) = self.scheduler.poll(now) else {
            return false;
        };

        if self.state.free_roam {
            self.ship.update(tick.dt);
            if tick.shake_tick {
                self.ship.apply_shake(now);
            }
        }

        let camera_position = self.camera_position(orbit_camera);
        MotionIntegrator::advance(registry, &self.state, camera_position, now);

        if tick.run_lod {
            LodController::update(registry, camera_position);
        }

        if !self.state.free_roam {
            let follow_frame = self.follow_frame(registry);
            self.director.update(orbit_camera, follow_frame, now);
            // The director drops to idle when the body vanished
            if self.state.followed.is_some() && follow_frame.is_none() {
                self.state.followed = None;
            }
        }

        true
    }

    /// World position the distance effects (LOD, corona, rings) measure from
    pub fn camera_position(&self, orbit_camera: &OrbitCamera) -> Vec3 {
        if self.state.free_roam {
            self.ship.position()
        } else {
            orbit_camera.position
        }
    }

    /// Toggle pause
    pub fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
        log::info!("Simulation {}", if self.state.paused { "paused" } else { "resumed" });
    }

    /// Toggle trail visibility, pushing it into the registry
    pub fn toggle_trails(&mut self, registry: &mut BodyRegistry) {
        self.state.trails_visible = !self.state.trails_visible;
        registry.set_trails_visible(self.state.trails_visible);
    }

    /// Toggle cockpit free-roam mode
    ///
    /// Entering cockpit mode drops any follow; the orbit camera keeps its
    /// pose for the return trip.
    pub fn toggle_free_roam(&mut self, registry: &BodyRegistry) {
        self.state.free_roam = !self.state.free_roam;
        if self.state.free_roam {
            self.state.followed = None;
            self.director.deselect();
            self.refresh_speed(registry);
            log::info!("Cockpit mode engaged");
        } else {
            log::info!("Returned to orbit view");
        }
    }

    /// Step the speed slider
    pub fn adjust_speed(&mut self, registry: &BodyRegistry, delta: f32) {
        self.speed_slider = (self.speed_slider + delta).clamp(-3.0, 3.0);
        self.refresh_speed(registry);
        log::info!("Speed modifier: {:.2}", self.state.speed_modifier);
    }

    /// Fly the camera to the n-th catalog body
    ///
    /// Out-of-range indices are ignored. Selection is by key, so a stale
    /// index after a rebuild selects nothing rather than the wrong body.
    /// Selecting resets the speed slider, so a followed planet runs at 1x
    /// and a followed moon at the moon modifier regardless of prior speed.
    pub fn select_body(
        &mut self,
        registry: &BodyRegistry,
        orbit_camera: &OrbitCamera,
        index: usize,
    ) {
        if self.state.free_roam {
            return;
        }
        let Some(key) = registry.key_at(index) else {
            return;
        };
        self.state.followed = Some(key);
        self.director.select(orbit_camera, self.now_ms());
        self.speed_slider = 0.0;
        self.refresh_speed(registry);
        if let Some(body) = registry.get(key) {
            log::info!("Following {}", body.name);
        }
    }

    /// Stop following, resetting the speed slider
    pub fn deselect(&mut self, registry: &BodyRegistry) {
        self.state.followed = None;
        self.director.deselect();
        self.speed_slider = 0.0;
        self.refresh_speed(registry);
    }

    /// Recompute the effective speed modifier
    ///
    /// Following a moon slows the whole simulation so the fast lunar orbit
    /// stays watchable.
    fn refresh_speed(&mut self, registry: &BodyRegistry) {
        let moon_factor = self
            .state
            .followed
            .and_then(|key| registry.get(key))
            .filter(|body| body.class == BodyClass::Moon)
            .map(|_| self.moon_speed_modifier)
            .unwrap_or(1.0);
        self.state.speed_modifier = speed_from_slider(self.speed_slider) * moon_factor;
    }

    /// Follow-frame snapshot for the director
    fn follow_frame(&self, registry: &BodyRegistry) -> Option<FollowFrame> {
        let key = self.state.followed?;
        let frame = registry.frame(key)?;
        let body = registry.get(key)?;
        Some(FollowFrame {
            position: frame.position,
            orientation: frame.pivot_rotation,
            size: body.size,
        })
    }
}
