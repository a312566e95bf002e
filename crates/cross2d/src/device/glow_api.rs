use glow::HasContext;

use crate::coords::Color;

use super::gl::{BufferId, GlApi, GlVersion, ProgramId, ShaderId, ShaderStage, VertexArrayId};

/// `GlApi` backed by a loaded `glow` function table.
///
/// The context this table was loaded from must stay current on the calling
/// thread for as long as the value is used.
pub struct GlowApi {
    gl: glow::Context,
}

impl GlowApi {
    /// Wraps an already-loaded `glow` context.
    ///
    /// # Safety
    /// `gl` must have been loaded for a context that is current on this thread.
    pub unsafe fn new(gl: glow::Context) -> Self {
        Self { gl }
    }
}

impl std::fmt::Debug for GlowApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowApi").field("version", self.gl.version()).finish()
    }
}

#[inline]
fn buffer(id: BufferId) -> glow::NativeBuffer {
    glow::NativeBuffer(id.0)
}

#[inline]
fn shader(id: ShaderId) -> glow::NativeShader {
    glow::NativeShader(id.0)
}

#[inline]
fn program(id: ProgramId) -> glow::NativeProgram {
    glow::NativeProgram(id.0)
}

#[inline]
fn vertex_array(id: VertexArrayId) -> glow::NativeVertexArray {
    glow::NativeVertexArray(id.0)
}

// SAFETY (all blocks below): the constructor contract guarantees a current
// context; handles only come from this same context.
impl GlApi for GlowApi {
    fn version(&self) -> GlVersion {
        let v = self.gl.version();
        GlVersion {
            major: v.major,
            minor: v.minor,
            embedded: v.is_embedded,
            vendor_info: v.vendor_info.clone(),
        }
    }

    fn get_error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        unsafe { self.gl.create_buffer() }.map(|b| BufferId(b.0))
    }

    fn bind_array_buffer(&self, id: Option<BufferId>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, id.map(buffer)) }
    }

    fn array_buffer_data(&self, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW)
        }
    }

    fn read_array_buffer(&self, len: usize) -> Option<Vec<u8>> {
        if self.gl.version().is_embedded {
            // glGetBufferSubData does not exist on GLES.
            return None;
        }
        let mut out = vec![0u8; len];
        unsafe { self.gl.get_buffer_sub_data(glow::ARRAY_BUFFER, 0, &mut out) };
        Some(out)
    }

    fn delete_buffer(&self, id: BufferId) {
        unsafe { self.gl.delete_buffer(buffer(id)) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        let ty = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { self.gl.create_shader(ty) }.map(|s| ShaderId(s.0))
    }

    fn compile_shader(&self, id: ShaderId, source: &str) -> bool {
        unsafe {
            self.gl.shader_source(shader(id), source);
            self.gl.compile_shader(shader(id));
            self.gl.get_shader_compile_status(shader(id))
        }
    }

    fn shader_info_log(&self, id: ShaderId) -> String {
        unsafe { self.gl.get_shader_info_log(shader(id)) }
    }

    fn delete_shader(&self, id: ShaderId) {
        unsafe { self.gl.delete_shader(shader(id)) }
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        unsafe { self.gl.create_program() }.map(|p| ProgramId(p.0))
    }

    fn attach_shader(&self, p: ProgramId, s: ShaderId) {
        unsafe { self.gl.attach_shader(program(p), shader(s)) }
    }

    fn detach_shader(&self, p: ProgramId, s: ShaderId) {
        unsafe { self.gl.detach_shader(program(p), shader(s)) }
    }

    fn link_program(&self, p: ProgramId) -> bool {
        unsafe {
            self.gl.link_program(program(p));
            self.gl.get_program_link_status(program(p))
        }
    }

    fn program_info_log(&self, p: ProgramId) -> String {
        unsafe { self.gl.get_program_info_log(program(p)) }
    }

    fn delete_program(&self, p: ProgramId) {
        unsafe { self.gl.delete_program(program(p)) }
    }

    fn use_program(&self, p: Option<ProgramId>) {
        unsafe { self.gl.use_program(p.map(program)) }
    }

    fn set_uniform_mat4(&self, p: ProgramId, name: &str, value: &[f32; 16]) -> bool {
        unsafe {
            match self.gl.get_uniform_location(program(p), name) {
                Some(loc) => {
                    self.gl.uniform_matrix_4_f32_slice(Some(&loc), false, value);
                    true
                }
                None => false,
            }
        }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        unsafe { self.gl.create_vertex_array() }.map(|v| VertexArrayId(v.0))
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayId>) {
        unsafe { self.gl.bind_vertex_array(vao.map(vertex_array)) }
    }

    fn delete_vertex_array(&self, vao: VertexArrayId) {
        unsafe { self.gl.delete_vertex_array(vertex_array(vao)) }
    }

    fn enable_vertex_attrib(&self, location: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(location) }
    }

    fn disable_vertex_attrib(&self, location: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(location) }
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, stride, offset)
        }
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(mode, first, count) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear(&self, color: Color) {
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn set_blend(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::BLEND);
                self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
    }

    fn set_depth_test(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }
}
