//! Recording GL used by unit tests.
//!
//! Emulates enough of a driver to exercise the renderer without a window:
//! buffers keep their bytes (so read-back works), a shader compiles when its
//! source has a `main` and balanced braces, and every state-changing call is
//! appended to a log.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::num::NonZeroU32;
use std::rc::Rc;

use crate::coords::Color;

use super::gl::{BufferId, GlApi, GlVersion, ProgramId, ShaderId, ShaderStage, VertexArrayId};
use super::handle::Device;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GlCall {
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    BufferData(usize),
    ReadBuffer(usize),
    DeleteBuffer(u32),
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    SetUniform(String),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    EnableAttrib(u32),
    DisableAttrib(u32),
    AttribPointer { location: u32, components: i32, stride: i32, offset: i32 },
    DrawArrays { mode: u32, first: i32, count: i32 },
    Viewport(i32, i32, i32, i32),
    Clear,
    SetBlend(bool),
    SetDepthTest(bool),
}

#[derive(Default)]
pub(crate) struct RecordingGl {
    calls: RefCell<Vec<GlCall>>,
    next_name: Cell<u32>,
    errors: RefCell<VecDeque<u32>>,
    fail_link: Cell<bool>,
    fail_vertex_array: Cell<bool>,

    buffers: RefCell<HashMap<u32, Vec<u8>>>,
    bound_buffer: Cell<Option<u32>>,
    shader_sources: RefCell<HashMap<u32, String>>,
    programs: RefCell<HashSet<u32>>,
}

impl RecordingGl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Queues a code for the next `get_error`.
    pub(crate) fn raise_error(&self, code: u32) {
        self.errors.borrow_mut().push_back(code);
    }

    /// Makes every subsequent link fail.
    pub(crate) fn fail_links(&self) {
        self.fail_link.set(true);
    }

    /// Makes every subsequent vertex array creation fail.
    pub(crate) fn fail_vertex_arrays(&self) {
        self.fail_vertex_array.set(true);
    }

    pub(crate) fn live_buffers(&self) -> usize {
        self.buffers.borrow().len()
    }

    pub(crate) fn live_programs(&self) -> usize {
        self.programs.borrow().len()
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn name(&self) -> NonZeroU32 {
        let next = self.next_name.get() + 1;
        self.next_name.set(next);
        NonZeroU32::new(next).unwrap_or(NonZeroU32::MIN)
    }
}

/// Device that is already available and backed by a fresh `RecordingGl`.
pub(crate) fn recording_device() -> (Device, Rc<RecordingGl>) {
    let gl = Rc::new(RecordingGl::new());
    let device = Device::unavailable();
    device.attach(gl.clone());
    device.mark_available();
    (device, gl)
}

fn plausible_glsl(source: &str) -> bool {
    let open = source.matches('{').count();
    let close = source.matches('}').count();
    source.contains("void main") && open > 0 && open == close
}

impl GlApi for RecordingGl {
    fn version(&self) -> GlVersion {
        GlVersion {
            major: 3,
            minor: 3,
            embedded: false,
            vendor_info: "recording".to_string(),
        }
    }

    fn get_error(&self) -> u32 {
        self.errors.borrow_mut().pop_front().unwrap_or(glow::NO_ERROR)
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        let name = self.name();
        self.buffers.borrow_mut().insert(name.get(), Vec::new());
        self.record(GlCall::CreateBuffer(name.get()));
        Ok(BufferId(name))
    }

    fn bind_array_buffer(&self, buffer: Option<BufferId>) {
        let name = buffer.map(|b| b.0.get());
        self.bound_buffer.set(name);
        self.record(GlCall::BindArrayBuffer(name));
    }

    fn array_buffer_data(&self, data: &[u8]) {
        if let Some(name) = self.bound_buffer.get() {
            self.buffers.borrow_mut().insert(name, data.to_vec());
        } else {
            self.raise_error(glow::INVALID_OPERATION);
        }
        self.record(GlCall::BufferData(data.len()));
    }

    fn read_array_buffer(&self, len: usize) -> Option<Vec<u8>> {
        self.record(GlCall::ReadBuffer(len));
        let name = self.bound_buffer.get()?;
        let buffers = self.buffers.borrow();
        let data = buffers.get(&name)?;
        data.get(..len).map(<[u8]>::to_vec)
    }

    fn delete_buffer(&self, buffer: BufferId) {
        self.buffers.borrow_mut().remove(&buffer.0.get());
        self.record(GlCall::DeleteBuffer(buffer.0.get()));
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        let name = self.name();
        self.record(GlCall::CreateShader(stage, name.get()));
        Ok(ShaderId(name))
    }

    fn compile_shader(&self, shader: ShaderId, source: &str) -> bool {
        self.shader_sources
            .borrow_mut()
            .insert(shader.0.get(), source.to_string());
        self.record(GlCall::CompileShader(shader.0.get()));
        plausible_glsl(source)
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        match self.shader_sources.borrow().get(&shader.0.get()) {
            Some(src) if !plausible_glsl(src) => {
                "0:1(1): error: syntax error, unexpected end of file".to_string()
            }
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.shader_sources.borrow_mut().remove(&shader.0.get());
        self.record(GlCall::DeleteShader(shader.0.get()));
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        let name = self.name();
        self.programs.borrow_mut().insert(name.get());
        self.record(GlCall::CreateProgram(name.get()));
        Ok(ProgramId(name))
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(GlCall::AttachShader(program.0.get(), shader.0.get()));
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(GlCall::DetachShader(program.0.get(), shader.0.get()));
    }

    fn link_program(&self, program: ProgramId) -> bool {
        self.record(GlCall::LinkProgram(program.0.get()));
        !self.fail_link.get()
    }

    fn program_info_log(&self, _program: ProgramId) -> String {
        if self.fail_link.get() {
            "error: vertex output `ourColor` not consumed by fragment stage".to_string()
        } else {
            String::new()
        }
    }

    fn delete_program(&self, program: ProgramId) {
        self.programs.borrow_mut().remove(&program.0.get());
        self.record(GlCall::DeleteProgram(program.0.get()));
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.record(GlCall::UseProgram(program.map(|p| p.0.get())));
    }

    fn set_uniform_mat4(&self, _program: ProgramId, name: &str, _value: &[f32; 16]) -> bool {
        self.record(GlCall::SetUniform(name.to_string()));
        true
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        if self.fail_vertex_array.get() {
            return Err("out of vertex array names".to_string());
        }
        let name = self.name();
        self.record(GlCall::CreateVertexArray(name.get()));
        Ok(VertexArrayId(name))
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayId>) {
        self.record(GlCall::BindVertexArray(vao.map(|v| v.0.get())));
    }

    fn delete_vertex_array(&self, vao: VertexArrayId) {
        self.record(GlCall::DeleteVertexArray(vao.0.get()));
    }

    fn enable_vertex_attrib(&self, location: u32) {
        self.record(GlCall::EnableAttrib(location));
    }

    fn disable_vertex_attrib(&self, location: u32) {
        self.record(GlCall::DisableAttrib(location));
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32) {
        self.record(GlCall::AttribPointer { location, components, stride, offset });
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(GlCall::DrawArrays { mode, first, count });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn clear(&self, _color: Color) {
        self.record(GlCall::Clear);
    }

    fn set_blend(&self, enabled: bool) {
        self.record(GlCall::SetBlend(enabled));
    }

    fn set_depth_test(&self, enabled: bool) {
        self.record(GlCall::SetDepthTest(enabled));
    }
}
