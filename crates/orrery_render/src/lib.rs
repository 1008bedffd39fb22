//! Solar system rendering
//!
//! This crate provides the wgpu-based forward renderer for the scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::OrbitCamera`] / [`camera::CockpitCamera`] - the two view modes
//! - [`pipeline::ScenePipeline`] - instanced forward pipeline with depth
//! - [`visuals::SceneVisuals`] - per-body GPU mesh cache driven by dirty flags
//! - [`model_loader::ModelLoader`] - background ship-model loading

pub mod camera;
pub mod context;
pub mod geometry;
pub mod model_loader;
pub mod pipeline;
pub mod visuals;

pub use camera::{CockpitCamera, OrbitCamera};
pub use context::RenderContext;
pub use geometry::MeshData;
pub use model_loader::{AssetError, LoadResult, ModelLoader};
pub use pipeline::{DrawBatch, GpuMesh, Instance, SceneUniforms, ScenePipeline, Vertex};
pub use visuals::{SceneVisuals, ShipPose};
