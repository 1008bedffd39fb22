//! Mesh generation for scene geometry
//!
//! All generators produce [`MeshData`], a plain CPU-side triangle list that
//! the pipeline uploads verbatim.

mod cone;
mod ring;
mod sphere;
mod starfield;

pub use cone::cone;
pub use ring::{annulus, trail_annulus};
pub use sphere::uv_sphere;
pub use starfield::starfield;

use serde::{Deserialize, Serialize};

use crate::pipeline::Vertex;

/// CPU-side indexed triangle mesh
///
/// Serializable so externally authored models (the ship) load from RON.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check every index refers to a vertex
    pub fn is_well_formed(&self) -> bool {
        self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < self.vertices.len())
    }
}
