//! Orrery - interactive solar system visualization
//!
//! An animated solar system scene with an orbit camera, selection flights,
//! and a free-roam cockpit mode.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
