//! Core simulation state and animation systems
//!
//! Owns the body registry, the catalog format, motion integration, the
//! level-of-detail controller and the frame scheduler. Nothing in this
//! crate touches the GPU or the window system.

pub mod belts;
pub mod body;
pub mod catalog;
pub mod descriptor;
pub mod lod;
pub mod motion;
pub mod registry;
pub mod scheduler;
pub mod state;

pub use belts::{Belt, BeltInstance, BeltSystem};
pub use body::{BodyKey, CelestialBody, DetailTier, DirtyFlags, OrbitPivot, Trail};
pub use catalog::{Catalog, CatalogError};
pub use descriptor::{BodyClass, BodyDescriptor, InfoText, RingSpec};
pub use lod::LodController;
pub use motion::MotionIntegrator;
pub use registry::{BodyFrame, BodyRegistry, TrailTicket};
pub use scheduler::{FrameScheduler, Tick};
pub use state::{speed_from_slider, SimState};
