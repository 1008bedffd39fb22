//! UV sphere generation

use std::f32::consts::PI;

use super::MeshData;
use crate::pipeline::Vertex;

/// Generate a unit UV sphere with `segments` divisions in both directions
///
/// Segment count comes from the body's detail tier; radius is applied per
/// instance, so the same mesh serves every body at a given tier.
pub fn uv_sphere(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);

    for row in 0..=segments {
        let v = row as f32 / segments as f32;
        let phi = v * PI;
        for col in 0..=segments {
            let u = col as f32 / segments as f32;
            let theta = u * 2.0 * PI;

            let position = [
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            ];
            // Unit sphere: the normal is the position
            vertices.push(Vertex {
                position,
                normal: position,
            });
        }
    }

    let stride = segments + 1;
    for row in 0..segments {
        for col in 0..segments {
            let a = row * stride + col;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let mesh = uv_sphere(8);
        assert_eq!(mesh.vertices.len(), 81);
        assert_eq!(mesh.triangle_count(), 128);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn test_sphere_is_unit() {
        let mesh = uv_sphere(16);
        for v in &mesh.vertices {
            let len = (v.position[0] * v.position[0]
                + v.position[1] * v.position[1]
                + v.position[2] * v.position[2])
                .sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_segment_count_clamped() {
        let mesh = uv_sphere(1);
        assert!(mesh.is_well_formed());
        assert!(mesh.triangle_count() > 0);
    }
}
