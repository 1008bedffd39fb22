//! GPU pipeline for the scene
//!
//! A single instanced forward pipeline draws every object in the scene:
//! spheres, rings, trails, belts, stars and the ship.

pub mod scene_pipeline;
pub mod types;

pub use scene_pipeline::{DrawBatch, GpuMesh, ScenePipeline};
pub use types::{Instance, SceneUniforms, Vertex};
