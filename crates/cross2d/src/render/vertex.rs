use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

use crate::coords::{Color, Vec2};

/// One vertex as laid out in GPU buffers.
///
/// Layout (32 bytes, tightly packed):
/// - `position`   location 0, 2 × f32, offset 0
/// - `color`      location 1, 4 × f32, offset 8
/// - `tex_coords` location 2, 2 × f32, offset 24
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec2,
    pub color: Color,
    pub tex_coords: Vec2,
}

/// One float attribute of [`Vertex`] as seen by the vertex shader.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
    pub offset: usize,
}

impl Vertex {
    /// Byte distance between consecutive vertices.
    pub const STRIDE: usize = size_of::<Vertex>();

    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute { location: 0, components: 2, offset: offset_of!(Vertex, position) },
        VertexAttribute { location: 1, components: 4, offset: offset_of!(Vertex, color) },
        VertexAttribute { location: 2, components: 2, offset: offset_of!(Vertex, tex_coords) },
    ];

    #[inline]
    pub const fn new(position: Vec2, color: Color, tex_coords: Vec2) -> Self {
        Self { position, color, tex_coords }
    }

    /// Untextured vertex.
    #[inline]
    pub const fn colored(position: Vec2, color: Color) -> Self {
        Self::new(position, color, Vec2::zero())
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Vec2::zero(), Color::WHITE, Vec2::zero())
    }
}

/// How a vertex sequence is assembled into primitives.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PrimitiveType {
    #[default]
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl PrimitiveType {
    /// GL draw mode for `glDrawArrays`.
    pub fn gl_mode(self) -> u32 {
        match self {
            PrimitiveType::Points => glow::POINTS,
            PrimitiveType::Lines => glow::LINES,
            PrimitiveType::LineStrip => glow::LINE_STRIP,
            PrimitiveType::Triangles => glow::TRIANGLES,
            PrimitiveType::TriangleStrip => glow::TRIANGLE_STRIP,
            PrimitiveType::TriangleFan => glow::TRIANGLE_FAN,
        }
    }
}
