use std::rc::Rc;

use crate::coords::Vec2;
use crate::device::{check_gl, Device, GlApi};

use super::shader::Shader;
use super::shader_list::ShaderList;
use super::vertex::Vertex;
use super::vertex_array::VertexArray;

/// Content drawn by [`Renderer::flip`](crate::renderer::Renderer::flip).
///
/// The drawable hierarchy lives outside this crate; whatever owns it
/// implements `Scene` and issues its draws through the [`RenderCtx`].
pub trait Scene {
    fn draw(&mut self, ctx: &mut RenderCtx<'_>);
}

/// Nothing to draw.
impl Scene for () {
    fn draw(&mut self, _ctx: &mut RenderCtx<'_>) {}
}

impl<F> Scene for F
where
    F: FnMut(&mut RenderCtx<'_>),
{
    fn draw(&mut self, ctx: &mut RenderCtx<'_>) {
        self(ctx)
    }
}

/// Per-frame draw context handed to [`Scene::draw`].
///
/// Holds the projection for the current target size (pixels, top-left
/// origin, +Y down) and the renderer's shader registry.
pub struct RenderCtx<'a> {
    device: &'a Device,
    gl: Rc<dyn GlApi>,
    shaders: &'a ShaderList,
    size: Vec2,
    projection: [f32; 16],
    draw_calls: u32,
}

impl<'a> RenderCtx<'a> {
    pub(crate) fn new(device: &'a Device, gl: Rc<dyn GlApi>, shaders: &'a ShaderList, size: Vec2) -> Self {
        Self {
            device,
            gl,
            shaders,
            size,
            projection: ortho(size),
            draw_calls: 0,
        }
    }

    /// Target size in pixels.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn shaders(&self) -> &'a ShaderList {
        self.shaders
    }

    /// Draw calls issued so far this frame.
    #[inline]
    pub fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    /// Draws `array` with `shader` at its own coordinates.
    pub fn draw(&mut self, array: &mut VertexArray, shader: &Shader) -> bool {
        self.draw_at(array, shader, Vec2::zero())
    }

    /// Draws `array` with `shader`, translated by `offset` pixels.
    ///
    /// Empty arrays and unavailable shaders are skipped. Returns whether a
    /// draw call was issued.
    pub fn draw_at(&mut self, array: &mut VertexArray, shader: &Shader, offset: Vec2) -> bool {
        if array.is_empty() {
            return false;
        }
        let Some(program) = shader.program().filter(|_| shader.is_available()) else {
            log::trace!("skipping draw: shader `{}` unavailable", shader.name());
            return false;
        };
        if !array.device().same_device(self.device) {
            log::warn!("skipping draw: vertex array belongs to another device");
            return false;
        }
        let Ok(count) = i32::try_from(array.vertex_count()) else {
            log::warn!("skipping draw: {} vertices exceed GL limits", array.vertex_count());
            return false;
        };

        let gl = self.gl.clone();
        gl.use_program(Some(program));
        gl.set_uniform_mat4(program, "projMtx", &self.projection);
        gl.set_uniform_mat4(program, "mdlvMtx", &translation(offset));

        if !array.bind() {
            gl.use_program(None);
            return false;
        }

        let stride = Vertex::STRIDE as i32;
        for attr in Vertex::ATTRIBUTES {
            gl.enable_vertex_attrib(attr.location);
            gl.vertex_attrib_pointer_f32(attr.location, attr.components, stride, attr.offset as i32);
        }

        gl.draw_arrays(array.primitive_type().gl_mode(), 0, count);

        for attr in Vertex::ATTRIBUTES {
            gl.disable_vertex_attrib(attr.location);
        }
        array.unbind();
        gl.use_program(None);

        self.draw_calls += 1;
        check_gl(&*gl, "RenderCtx::draw")
    }
}

/// Column-major orthographic projection mapping pixels to NDC.
#[rustfmt::skip]
fn ortho(size: Vec2) -> [f32; 16] {
    let w = size.x.max(1.0);
    let h = size.y.max(1.0);
    [
        2.0 / w, 0.0, 0.0, 0.0,
        0.0, -2.0 / h, 0.0, 0.0,
        0.0, 0.0, -1.0, 0.0,
        -1.0, 1.0, 0.0, 1.0,
    ]
}

/// Column-major translation.
#[rustfmt::skip]
fn translation(offset: Vec2) -> [f32; 16] {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        offset.x, offset.y, 0.0, 1.0,
    ]
}
