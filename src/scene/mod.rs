//! Scene construction utilities
//!
//! Builds the runtime body registry from the catalog.

mod scene_builder;

pub use scene_builder::SceneBuilder;
