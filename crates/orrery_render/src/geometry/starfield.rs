//! Background starfield generation

use rand::Rng;

use super::MeshData;
use crate::pipeline::Vertex;

/// Radius of the starfield shell
pub const STARFIELD_RADIUS: f32 = 2800.0;
/// Number of stars
pub const STAR_COUNT: usize = 250;

/// Generate the background starfield as small camera-independent quads
///
/// Stars are scattered on a shell far outside the outermost orbit. Each is
/// a small quad facing the origin; at this distance per-star orientation
/// error is invisible.
pub fn starfield(rng: &mut impl Rng) -> MeshData {
    starfield_with(rng, STAR_COUNT, STARFIELD_RADIUS)
}

/// Generate a starfield with explicit count and radius
pub fn starfield_with(rng: &mut impl Rng, count: usize, radius: f32) -> MeshData {
    let mut vertices = Vec::with_capacity(count * 4);
    let mut indices = Vec::with_capacity(count * 6);

    for star in 0..count {
        // Uniform direction on the sphere
        let z: f32 = rng.gen::<f32>() * 2.0 - 1.0;
        let theta = rng.gen::<f32>() * std::f32::consts::TAU;
        let planar = (1.0 - z * z).sqrt();
        let dir = [planar * theta.cos(), z, planar * theta.sin()];
        let center = [dir[0] * radius, dir[1] * radius, dir[2] * radius];

        // Tangent basis on the shell
        let up = if dir[1].abs() < 0.99 { [0.0, 1.0, 0.0] } else { [1.0, 0.0, 0.0] };
        let right = cross(dir, up);
        let right = normalize(right);
        let star_up = normalize(cross(right, dir));

        let half = radius * 0.002;
        let base = (star * 4) as u32;
        for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            vertices.push(Vertex {
                position: [
                    center[0] + (right[0] * sx + star_up[0] * sy) * half,
                    center[1] + (right[1] * sx + star_up[1] * sy) * half,
                    center[2] + (right[2] * sx + star_up[2] * sy) * half,
                ],
                normal: [-dir[0], -dir[1], -dir[2]],
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}
