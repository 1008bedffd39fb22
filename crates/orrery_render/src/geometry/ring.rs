//! Flat annulus generation for planetary rings and orbital trails

use std::f32::consts::TAU;

use super::MeshData;
use crate::pipeline::Vertex;

/// Generate a flat ring in the XZ plane between two radii
///
/// Planetary rings use 32 segments; orbital trails use 128 with a thin
/// band around the orbit radius.
pub fn annulus(inner_radius: f32, outer_radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments as usize + 1) * 2);
    let mut indices = Vec::with_capacity(segments as usize * 6);

    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        for radius in [inner_radius, outer_radius] {
            vertices.push(Vertex {
                position: [cos * radius, 0.0, sin * radius],
                normal: [0.0, 1.0, 0.0],
            });
        }
    }

    for i in 0..segments {
        let a = i * 2;
        indices.extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
    }

    MeshData { vertices, indices }
}

/// Generate the trail annulus for an orbit of the given radius
pub fn trail_annulus(orbit_radius: f32) -> MeshData {
    annulus(orbit_radius - 0.04, orbit_radius + 0.04, 128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annulus_counts() {
        let mesh = annulus(2.5, 4.0, 32);
        assert_eq!(mesh.vertices.len(), 66);
        assert_eq!(mesh.triangle_count(), 64);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn test_annulus_radii() {
        let mesh = annulus(2.5, 4.0, 32);
        for v in &mesh.vertices {
            let r = (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt();
            assert!(r > 2.49 && r < 4.01, "radius {}", r);
            assert_eq!(v.position[1], 0.0);
        }
    }

    #[test]
    fn test_trail_band_is_thin() {
        let mesh = trail_annulus(20.0);
        for v in &mesh.vertices {
            let r = (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt();
            assert!((r - 20.0).abs() < 0.041);
        }
    }
}
