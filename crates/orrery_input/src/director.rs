//! Camera director: selection flights and follow tracking
//!
//! Drives any [`OrbitRig`] toward a selected body: a timed, eased flight
//! first, then frame-rate-independent-ish exponential tracking that keeps
//! the body framed as it orbits. Deselection simply stops driving the rig,
//! leaving it wherever the flight ended.

use log::debug;
use orrery_math::{Quat, Vec3};

/// Default flight duration in milliseconds
const TRANSITION_DURATION_MS: f64 = 6000.0;
/// Per-tick exponential tracking rate while following
const FOLLOW_RATE: f32 = 0.1;

/// Camera rig the director can drive
///
/// The render crate's orbit camera implements this; tests use a plain
/// position/target pair.
pub trait OrbitRig {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn target(&self) -> Vec3;
    fn set_target(&mut self, target: Vec3);
}

/// Per-tick snapshot of the followed body's pose
#[derive(Clone, Copy, Debug)]
pub struct FollowFrame {
    /// World position of the body's mesh
    pub position: Vec3,
    /// World rotation of the body's orbit pivot; the viewing offset rides
    /// this so the camera stays on the sunward shoulder of the orbit
    pub orientation: Quat,
    /// Body radius, sets the framing distance
    pub size: f32,
}

/// What the director is currently doing to the rig
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectorPhase {
    /// Not driving the rig; manual orbit control
    Idle,
    /// Timed eased flight toward the body
    Transitioning,
    /// Continuous tracking of the orbiting body
    Following,
}

struct Transition {
    started_ms: f64,
    start_position: Vec3,
    start_target: Vec3,
}

/// Selection flight and follow-tracking state machine
pub struct CameraDirector {
    transition: Option<Transition>,
    following: bool,
    pub duration_ms: f64,
    pub follow_rate: f32,
}

impl Default for CameraDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDirector {
    pub fn new() -> Self {
        Self {
            transition: None,
            following: false,
            duration_ms: TRANSITION_DURATION_MS,
            follow_rate: FOLLOW_RATE,
        }
    }

    /// Current phase
    pub fn phase(&self) -> DirectorPhase {
        if self.transition.is_some() {
            DirectorPhase::Transitioning
        } else if self.following {
            DirectorPhase::Following
        } else {
            DirectorPhase::Idle
        }
    }

    /// Begin a flight from the rig's current pose
    ///
    /// Selecting while a flight is already running restarts it from the
    /// rig's present position, so rapid re-selection never snaps.
    pub fn select<R: OrbitRig>(&mut self, rig: &R, now_ms: f64) {
        debug!("camera flight started");
        self.transition = Some(Transition {
            started_ms: now_ms,
            start_position: rig.position(),
            start_target: rig.target(),
        });
        self.following = false;
    }

    /// Stop driving the rig, keeping its current pose
    pub fn deselect(&mut self) {
        self.transition = None;
        self.following = false;
    }

    /// Drive the rig one tick toward the followed body
    ///
    /// `frame` is `None` when the followed body no longer exists; the
    /// director drops to idle rather than chase a stale pose.
    pub fn update<R: OrbitRig>(&mut self, rig: &mut R, frame: Option<FollowFrame>, now_ms: f64) {
        let Some(frame) = frame else {
            if self.phase() != DirectorPhase::Idle {
                debug!("followed body vanished, dropping to idle");
                self.deselect();
            }
            return;
        };

        let desired = Self::viewing_position(&frame);

        if let Some(transition) = &self.transition {
            let progress = ((now_ms - transition.started_ms) / self.duration_ms).clamp(0.0, 1.0);
            let eased = ease_in_out_cubic(progress as f32);

            rig.set_position(transition.start_position.lerp(desired, eased));
            rig.set_target(transition.start_target.lerp(frame.position, eased));

            if progress >= 1.0 {
                debug!("camera flight complete, following");
                self.transition = None;
                self.following = true;
            }
        } else if self.following {
            let position = rig.position().lerp(desired, self.follow_rate);
            let target = rig.target().lerp(frame.position, self.follow_rate);
            rig.set_position(position);
            rig.set_target(target);
        }
    }

    /// Where the camera should sit to frame the body
    ///
    /// An offset proportional to the body's size, rotated into the orbit
    /// pivot's frame so it trails the body around the sun.
    fn viewing_position(frame: &FollowFrame) -> Vec3 {
        let s = frame.size * 2.0;
        frame.position + frame.orientation.rotate(Vec3::new(s, s * 0.6, s))
    }
}

/// Cubic ease: slow start, fast middle, slow settle
fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRig {
        position: Vec3,
        target: Vec3,
    }

    impl TestRig {
        fn new() -> Self {
            Self {
                position: Vec3::new(0.0, 25.0, 40.0),
                target: Vec3::ZERO,
            }
        }
    }

    impl OrbitRig for TestRig {
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

    fn frame_at(position: Vec3) -> FollowFrame {
        FollowFrame {
            position,
            orientation: Quat::IDENTITY,
            size: 1.0,
        }
    }

    #[test]
    fn test_idle_director_leaves_rig_alone() {
        let mut rig = TestRig::new();
        let mut director = CameraDirector::new();

        director.update(&mut rig, Some(frame_at(Vec3::new(20.0, 0.0, 0.0))), 0.0);
        assert_eq!(rig.position(), Vec3::new(0.0, 25.0, 40.0));
        assert_eq!(director.phase(), DirectorPhase::Idle);
    }

    #[test]
    fn test_flight_reaches_body_and_follows() {
        let mut rig = TestRig::new();
        let mut director = CameraDirector::new();
        let frame = frame_at(Vec3::new(20.0, 0.0, 0.0));

        director.select(&rig, 0.0);
        assert_eq!(director.phase(), DirectorPhase::Transitioning);

        director.update(&mut rig, Some(frame), 6000.0);
        assert_eq!(director.phase(), DirectorPhase::Following);
        // Offset is size-proportional: (2, 1.2, 2) from the body
        assert_eq!(rig.position(), Vec3::new(22.0, 1.2, 2.0));
        assert_eq!(rig.target(), Vec3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn test_flight_midpoint_is_between_endpoints() {
        let mut rig = TestRig::new();
        let mut director = CameraDirector::new();
        let frame = frame_at(Vec3::new(20.0, 0.0, 0.0));

        director.select(&rig, 0.0);
        director.update(&mut rig, Some(frame), 3000.0);

        assert_eq!(director.phase(), DirectorPhase::Transitioning);
        // Cubic ease hits exactly one half at the midpoint
        let expected = Vec3::new(0.0, 25.0, 40.0).lerp(Vec3::new(22.0, 1.2, 2.0), 0.5);
        assert!((rig.position() - expected).length() < 1e-4);
    }

    #[test]
    fn test_easing_is_gentle_at_the_ends() {
        let mut rig = TestRig::new();
        let mut director = CameraDirector::new();
        let frame = frame_at(Vec3::new(20.0, 0.0, 0.0));
        let start = rig.position();

        director.select(&rig, 0.0);
        director.update(&mut rig, Some(frame), 600.0);

        // 10% of the flight time covers far less than 10% of the distance
        let covered = (rig.position() - start).length();
        let total = (Vec3::new(22.0, 1.2, 2.0) - start).length();
        assert!(covered / total < 0.01, "covered {}", covered / total);
    }

    #[test]
    fn test_follow_tracks_moving_body() {
        let mut rig = TestRig::new();
        let mut director = CameraDirector::new();

        director.select(&rig, 0.0);
        director.update(&mut rig, Some(frame_at(Vec3::new(20.0, 0.0, 0.0))), 6000.0);
        assert_eq!(director.phase(), DirectorPhase::Following);

        // Body moves; repeated ticks converge the rig onto the new pose
        let moved = frame_at(Vec3::new(0.0, 0.0, -20.0));
        for i in 0..200 {
            director.update(&mut rig, Some(moved), 6000.0 + i as f64 * 16.7);
        }
        assert!((rig.target() - moved.position).length() < 1e-2);
        assert!((rig.position() - Vec3::new(2.0, 1.2, -18.0)).length() < 1e-2);
    }

    #[test]
    fn test_reselection_mid_flight_restarts_from_current_pose() {
        let mut rig = TestRig::new();
        let mut director = CameraDirector::new();

        director.select(&rig, 0.0);
        director.update(&mut rig, Some(frame_at(Vec3::new(20.0, 0.0, 0.0))), 3000.0);
        let mid = rig.position();

        // New selection: the flight restarts from where the rig is now
        director.select(&rig, 3000.0);
        director.update(&mut rig, Some(frame_at(Vec3::new(-40.0, 0.0, 0.0))), 3000.0);
        assert!((rig.position() - mid).length() < 1e-4);
        assert_eq!(director.phase(), DirectorPhase::Transitioning);
    }

    #[test]
    fn test_deselect_keeps_pose() {
        let mut rig = TestRig::new();
        let mut director = CameraDirector::new();

        director.select(&rig, 0.0);
        director.update(&mut rig, Some(frame_at(Vec3::new(20.0, 0.0, 0.0))), 6000.0);
        let pose = rig.position();

        director.deselect();
        assert_eq!(director.phase(), DirectorPhase::Idle);
        director.update(&mut rig, Some(frame_at(Vec3::new(0.0, 0.0, -20.0))), 7000.0);
        assert_eq!(rig.position(), pose);
    }

    #[test]
    fn test_vanished_body_drops_to_idle() {
        let mut rig = TestRig::new();
        let mut director = CameraDirector::new();

        director.select(&rig, 0.0);
        director.update(&mut rig, None, 100.0);
        assert_eq!(director.phase(), DirectorPhase::Idle);
    }

    #[test]
    fn test_viewing_offset_rides_orbit_orientation() {
        let mut rig = TestRig::new();
        let mut director = CameraDirector::new();
        // Quarter-turn pivot: the offset swings with the orbit
        let frame = FollowFrame {
            position: Vec3::new(0.0, 0.0, -20.0),
            orientation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            size: 1.0,
        };

        director.select(&rig, 0.0);
        director.update(&mut rig, Some(frame), 6000.0);
        // Local (2, 1.2, 2) under a +90 degree yaw becomes (2, 1.2, -2)
        assert!((rig.position() - Vec3::new(2.0, 1.2, -22.0)).length() < 1e-3);
    }
}
