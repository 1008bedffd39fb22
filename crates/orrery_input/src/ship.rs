//! Free-roam ship controller for cockpit mode
//!
//! Controls:
//! - W/S: Forward/backward along the ship's facing
//! - A/D: Left/right strafe
//! - Up/Down arrows: Vertical translation
//! - Left/Right arrows: Yaw
//! - Q/E: Roll
//! - R/F: Pitch
//!
//! Translation is scaled by delta time; rotation rates are fixed per tick.

use orrery_math::{Quat, Vec3};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Per-axis thrust component before normalization
const THRUST_COMPONENT: f32 = 0.2;

/// Free-roam ship state and keyboard handling
pub struct ShipController {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,

    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    yaw_left: bool,
    yaw_right: bool,
    roll_left: bool,
    roll_right: bool,
    pitch_up: bool,
    pitch_down: bool,

    // Configuration
    pub move_speed: f32,
    pub yaw_rate: f32,
    pub roll_rate: f32,
    pub pitch_rate: f32,
    pub shake_amplitude: f32,
}

impl Default for ShipController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipController {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 30.0),
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,

            forward: false,
            backward: false,
            left: false,
            right: false,
            up: false,
            down: false,
            yaw_left: false,
            yaw_right: false,
            roll_left: false,
            roll_right: false,
            pitch_up: false,
            pitch_down: false,

            move_speed: 10.0,
            yaw_rate: 0.015,
            roll_rate: 0.02,
            pitch_rate: 0.02,
            shake_amplitude: 0.00002,
        }
    }

    /// Process keyboard input
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.forward = pressed; true }
            KeyCode::KeyS => { self.backward = pressed; true }
            KeyCode::KeyA => { self.left = pressed; true }
            KeyCode::KeyD => { self.right = pressed; true }
            KeyCode::ArrowUp => { self.up = pressed; true }
            KeyCode::ArrowDown => { self.down = pressed; true }
            KeyCode::ArrowLeft => { self.yaw_left = pressed; true }
            KeyCode::ArrowRight => { self.yaw_right = pressed; true }
            KeyCode::KeyQ => { self.roll_left = pressed; true }
            KeyCode::KeyE => { self.roll_right = pressed; true }
            KeyCode::KeyR => { self.pitch_up = pressed; true }
            KeyCode::KeyF => { self.pitch_down = pressed; true }
            _ => false,
        }
    }

    /// Advance ship attitude and position by one tick
    pub fn update(&mut self, dt: f32) {
        if self.yaw_left { self.yaw += self.yaw_rate; }
        if self.yaw_right { self.yaw -= self.yaw_rate; }
        if self.roll_left { self.roll += self.roll_rate; }
        if self.roll_right { self.roll -= self.roll_rate; }
        if self.pitch_up { self.pitch += self.pitch_rate; }
        if self.pitch_down { self.pitch -= self.pitch_rate; }

        let fwd = (self.forward as i32 - self.backward as i32) as f32;
        let rgt = (self.right as i32 - self.left as i32) as f32;
        let up_down = (self.up as i32 - self.down as i32) as f32;

        // Ship-local thrust: forward is -Z
        let thrust = Vec3::new(
            rgt * THRUST_COMPONENT,
            up_down * THRUST_COMPONENT,
            -fwd * THRUST_COMPONENT,
        );
        if thrust.length() > 0.0 {
            let world = self.orientation().rotate(thrust.normalized());
            self.position += world * (self.move_speed * dt);
        }
    }

    /// Apply the engine-rumble jitter for this tick
    ///
    /// Called on every other tick; the offsets accumulate rather than
    /// oscillate around the flight path, giving a slow drift on top of the
    /// high-frequency buzz.
    pub fn apply_shake(&mut self, wall_ms: f64) {
        self.position.x += (wall_ms * 0.01).sin() as f32 * self.shake_amplitude;
        self.position.y += (wall_ms * 0.015).cos() as f32 * self.shake_amplitude * 0.5;
    }

    /// Current ship orientation
    ///
    /// Pitch, then yaw, then roll, matching the attitude controls: roll
    /// banks around the ship's own forward axis.
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch)
            * Quat::from_rotation_y(self.yaw)
            * Quat::from_rotation_z(self.roll)
    }

    /// Current ship position
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Reset the ship to its spawn pose
    pub fn respawn(&mut self) {
        self.position = Vec3::new(0.0, 0.0, 30.0);
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.roll = 0.0;
    }

    /// Builder: set translation speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set the per-tick yaw rate
    pub fn with_yaw_rate(mut self, rate: f32) -> Self {
        self.yaw_rate = rate;
        self
    }

    /// Builder: set the shake amplitude
    pub fn with_shake_amplitude(mut self, amplitude: f32) -> Self {
        self.shake_amplitude = amplitude;
        self
    }
}
