//! Scene cameras
//!
//! Two views of the same scene:
//! - [`OrbitCamera`] - the overview camera, driven either by the user or by
//!   the camera director during selection flights
//! - [`CockpitCamera`] - rides the free-roam ship, rotating with it
//!
//! Both produce a view-projection matrix for the scene uniforms.

use orrery_input::OrbitRig;
use orrery_math::{Mat4, Quat, Vec3};

/// Overview camera orbiting the scene origin or a followed body
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 25.0, 40.0),
            target: Vec3::ZERO,
            fov_y: 75f32.to_radians(),
            near: 0.00001,
            far: 200_000.0,
        }
    }

    /// View-projection matrix for the given aspect ratio
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at(self.position, self.target, Vec3::Y);
        let projection = Mat4::perspective(self.fov_y, aspect, self.near, self.far);
        projection * view
    }
}

impl OrbitRig for OrbitCamera {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
    fn target(&self) -> Vec3 {
        self.target
    }
    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }
}

/// First-person camera attached to the ship cockpit
pub struct CockpitCamera {
    /// Offset from the ship origin, in ship-local space
    pub local_offset: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CockpitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CockpitCamera {
    pub fn new() -> Self {
        Self {
            local_offset: Vec3::new(0.0, 0.01, 0.1),
            fov_y: 40f32.to_radians(),
            near: 0.01,
            far: 200_000.0,
        }
    }

    /// View-projection matrix for a ship at the given pose
    pub fn view_projection(&self, position: Vec3, orientation: Quat, aspect: f32) -> Mat4 {
        let eye = self.eye_position(position, orientation);
        let forward = orientation.rotate(-Vec3::Z);
        let up = orientation.rotate(Vec3::Y);
        let view = Mat4::look_at(eye, eye + forward, up);
        let projection = Mat4::perspective(self.fov_y, aspect, self.near, self.far);
        projection * view
    }

    /// World-space eye position for a ship at the given pose
    pub fn eye_position(&self, position: Vec3, orientation: Quat) -> Vec3 {
        position + orientation.rotate(self.local_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_orbit_camera_start_pose() {
        let cam = OrbitCamera::new();
        assert_eq!(cam.position, Vec3::new(0.0, 25.0, 40.0));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn test_orbit_camera_implements_rig() {
        let mut cam = OrbitCamera::new();
        OrbitRig::set_position(&mut cam, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(OrbitRig::position(&cam), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_view_projection_maps_target_to_center() {
        let cam = OrbitCamera::new();
        let vp = cam.view_projection(1.0);
        // The target projects onto the view axis: x and y vanish
        let projected = vp.transform_point(cam.target);
        assert!(projected.x.abs() < 1e-4);
        assert!(projected.y.abs() < 1e-4);
    }

    #[test]
    fn test_cockpit_eye_rides_ship_rotation() {
        let cam = CockpitCamera::new();
        let yawed = Quat::from_rotation_y(FRAC_PI_2);
        let eye = cam.eye_position(Vec3::ZERO, yawed);
        // Local (0, 0.01, 0.1) under a quarter yaw lands on the +X side
        assert!((eye.x - 0.1).abs() < 1e-5);
        assert!(eye.z.abs() < 1e-5);
        assert!((eye.y - 0.01).abs() < 1e-6);
    }
}
