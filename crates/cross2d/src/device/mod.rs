//! GPU device layer.
//!
//! This module is responsible for:
//! - the narrow OpenGL surface the renderer needs (`GlApi`)
//! - the `glow`-backed implementation of that surface
//! - the shared availability handle (`Device`) injected into every GPU resource
//! - error-checking GL call sites (`check_gl`)

mod check;
mod gl;
mod glow_api;
mod handle;

#[cfg(test)]
pub(crate) mod testing;

pub use check::{check_gl, gl_error_name};
pub use gl::{BufferId, GlApi, GlVersion, ProgramId, ShaderId, ShaderStage, VertexArrayId};
pub use glow_api::GlowApi;
pub use handle::Device;
