//! Cone generation for the placeholder ship mesh

use std::f32::consts::TAU;

use super::MeshData;
use crate::pipeline::Vertex;

/// Generate a cone pointing down -Z (the ship's forward axis)
///
/// Stands in for the ship while the external model loads, or permanently
/// if loading fails.
pub fn cone(radius: f32, length: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Tip
    vertices.push(Vertex {
        position: [0.0, 0.0, -length],
        normal: [0.0, 0.0, -1.0],
    });
    // Base ring
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        vertices.push(Vertex {
            position: [cos * radius, sin * radius, 0.0],
            normal: [cos, sin, 0.0],
        });
    }
    // Base center
    let base_center = vertices.len() as u32;
    vertices.push(Vertex {
        position: [0.0, 0.0, 0.0],
        normal: [0.0, 0.0, 1.0],
    });

    for i in 0..segments {
        let a = 1 + i;
        let b = 1 + (i + 1) % segments;
        // Side
        indices.extend_from_slice(&[0, a, b]);
        // Base cap
        indices.extend_from_slice(&[base_center, b, a]);
    }

    MeshData { vertices, indices }
}
