//! Math primitives for the orrery engine
//!
//! Minimal 3D linear algebra: [`Vec3`], [`Quat`], and [`Mat4`]. Everything is
//! plain `f32`; matrices are column-major so they upload to the GPU as-is.

mod mat4;
mod quat;
mod vec3;

pub use mat4::Mat4;
pub use quat::Quat;
pub use vec3::Vec3;
