//! GPU-compatible data types for the scene pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A mesh vertex with position and normal
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Per-instance data: one drawn object
///
/// The model matrix carries position, rotation and scale; color and
/// emissive stand in for the original texture set (see the rendering
/// notes in DESIGN.md).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Instance {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    /// RGBA base color
    pub color: [f32; 4],
    /// 1.0 for self-lit objects (sun, corona, stars, trails)
    pub emissive: f32,
    pub _padding: [f32; 3],
}

impl Instance {
    pub fn new(model: [[f32; 4]; 4], color: [f32; 4], emissive: f32) -> Self {
        Self {
            model,
            color,
            emissive,
            _padding: [0.0; 3],
        }
    }
}

/// Scene-wide uniforms
/// Layout: 96 bytes total (must match scene.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Combined view-projection matrix (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// World-space light position (the sun) + padding (16 bytes)
    pub light_position: [f32; 3],
    pub _padding: f32,
    /// Lighting parameters (16 bytes)
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    pub _padding2: [f32; 2],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            light_position: [0.0, 0.0, 0.0],
            _padding: 0.0,
            ambient_strength: 0.2,
            diffuse_strength: 0.8,
            _padding2: [0.0; 2],
        }
    }
}
