//! Retained-geometry rendering on top of the GL device.
//!
//! - `Vertex` / `VertexArray`: CPU vertex lists mirrored into GPU buffers
//! - `Shader` / `ShaderList`: linked programs and the named registry
//! - `RenderCtx` / `Scene`: per-frame draw dispatch
//!
//! Convention: geometry is in pixels (top-left origin, +Y down); the vertex
//! shaders convert to NDC with the `projMtx` uniform.

pub mod builtin;
mod ctx;
mod shader;
mod shader_list;
mod vertex;
mod vertex_array;

pub use ctx::{RenderCtx, Scene};
pub use shader::Shader;
pub use shader_list::{ShaderList, ShaderListError, COLOR_SHADER, DEFAULT_SHADER};
pub use vertex::{PrimitiveType, Vertex, VertexAttribute};
pub use vertex_array::VertexArray;
