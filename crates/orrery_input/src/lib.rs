//! Camera and ship input handling
//!
//! Provides the free-roam ship controller for cockpit mode and the camera
//! director that flies the orbit camera toward selected bodies.

mod director;
mod ship;

pub use director::{CameraDirector, DirectorPhase, FollowFrame, OrbitRig};
pub use ship::ShipController;
