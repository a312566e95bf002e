use std::num::NonZeroU32;

use crate::coords::Color;

/// GPU buffer object name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferId(pub NonZeroU32);

/// Shader stage object name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderId(pub NonZeroU32);

/// Linked program object name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramId(pub NonZeroU32);

/// Vertex array object name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexArrayId(pub NonZeroU32);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// Context version as reported by the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
    pub embedded: bool,
    pub vendor_info: String,
}

/// The slice of OpenGL the renderer, shaders and vertex arrays use.
///
/// Every method must be called on the thread that owns the context. Buffer
/// operations act on the `ARRAY_BUFFER` binding point.
pub trait GlApi {
    fn version(&self) -> GlVersion;

    /// Pops one code off the error queue (`0` when clean).
    fn get_error(&self) -> u32;

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<BufferId, String>;
    fn bind_array_buffer(&self, buffer: Option<BufferId>);
    /// Replaces the contents of the bound buffer (`STATIC_DRAW`).
    fn array_buffer_data(&self, data: &[u8]);
    /// Reads `len` bytes back from the bound buffer, where supported.
    fn read_array_buffer(&self, len: usize) -> Option<Vec<u8>>;
    fn delete_buffer(&self, buffer: BufferId);

    // ── shaders / programs ────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String>;
    /// Uploads `source`, compiles, and returns the compile status.
    fn compile_shader(&self, shader: ShaderId, source: &str) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&self, shader: ShaderId);

    fn create_program(&self) -> Result<ProgramId, String>;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn detach_shader(&self, program: ProgramId, shader: ShaderId);
    /// Links and returns the link status.
    fn link_program(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    fn delete_program(&self, program: ProgramId);
    fn use_program(&self, program: Option<ProgramId>);
    /// Sets a `mat4` uniform on the current program. Returns false when the
    /// program has no active uniform with that name.
    fn set_uniform_mat4(&self, program: ProgramId, name: &str, value: &[f32; 16]) -> bool;

    // ── vertex input ──────────────────────────────────────────────────────

    fn create_vertex_array(&self) -> Result<VertexArrayId, String>;
    fn bind_vertex_array(&self, vao: Option<VertexArrayId>);
    fn delete_vertex_array(&self, vao: VertexArrayId);
    fn enable_vertex_attrib(&self, location: u32);
    fn disable_vertex_attrib(&self, location: u32);
    /// Float attribute sourced from the bound array buffer.
    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32);
    fn draw_arrays(&self, mode: u32, first: i32, count: i32);

    // ── fixed state ───────────────────────────────────────────────────────

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear(&self, color: Color);
    /// Straight-alpha blending (`SRC_ALPHA`, `ONE_MINUS_SRC_ALPHA`).
    fn set_blend(&self, enabled: bool);
    fn set_depth_test(&self, enabled: bool);
}
