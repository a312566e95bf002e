use std::ops::{Index, IndexMut};

use crate::coords::{Rect, Vec2};
use crate::device::{check_gl, BufferId, Device};

use super::vertex::{PrimitiveType, Vertex};

/// Ordered vertex list mirrored into a GPU buffer.
///
/// The CPU sequence is the source of truth. Every mutation marks the GPU copy
/// stale and the next [`bind`](Self::bind) re-uploads the whole sequence before
/// binding, so drawing code never observes stale contents. The buffer itself
/// is created on first upload and deleted when the array is dropped.
///
/// All GPU work is skipped while the owning device is unavailable.
pub struct VertexArray {
    device: Device,
    vertices: Vec<Vertex>,
    primitive: PrimitiveType,
    vbo: Option<BufferId>,
    /// Vertex count of the last successful upload.
    uploaded_len: usize,
    stale: bool,
}

impl VertexArray {
    pub fn new(device: &Device, primitive: PrimitiveType) -> Self {
        Self::with_len(device, primitive, 0)
    }

    /// Array of `len` default vertices.
    pub fn with_len(device: &Device, primitive: PrimitiveType, len: usize) -> Self {
        Self {
            device: device.clone(),
            vertices: vec![Vertex::default(); len],
            primitive,
            vbo: None,
            uploaded_len: 0,
            stale: true,
        }
    }

    /// Builds an array from existing vertices.
    pub fn from_vertices(device: &Device, primitive: PrimitiveType, vertices: Vec<Vertex>) -> Self {
        Self {
            device: device.clone(),
            vertices,
            primitive,
            vbo: None,
            uploaded_len: 0,
            stale: true,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Vertex> {
        let vertex = self.vertices.get_mut(index)?;
        self.stale = true;
        Some(vertex)
    }

    pub fn append(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
        self.stale = true;
    }

    /// Truncates, or pads with `Vertex::default()`, to exactly `len` vertices.
    pub fn resize(&mut self, len: usize) {
        self.vertices.resize(len, Vertex::default());
        self.stale = true;
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.stale = true;
    }

    #[inline]
    pub fn primitive_type(&self) -> PrimitiveType {
        self.primitive
    }

    #[inline]
    pub fn set_primitive_type(&mut self, primitive: PrimitiveType) {
        self.primitive = primitive;
    }

    /// Whether the GPU buffer holds the current CPU sequence.
    #[inline]
    pub fn is_synced(&self) -> bool {
        !self.stale
    }

    #[inline]
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Smallest rectangle covering every vertex position.
    ///
    /// Zero-area at the origin for an empty array.
    pub fn bounds(&self) -> Rect {
        let Some((first, rest)) = self.vertices.split_first() else {
            return Rect::default();
        };

        let (min, max) = rest.iter().fold(
            (first.position, first.position),
            |(min, max): (Vec2, Vec2), v| (min.min(v.position), max.max(v.position)),
        );

        Rect::from_min_max(min, max)
    }

    /// Uploads the CPU sequence now. Returns whether the GPU copy is current.
    ///
    /// Leaves the array buffer binding cleared.
    pub fn upload(&mut self) -> bool {
        let Some(gl) = self.device.gl() else {
            return false;
        };

        let vbo = match self.vbo {
            Some(vbo) => vbo,
            None => match gl.create_buffer() {
                Ok(vbo) => {
                    log::debug!("created vertex buffer {:?}", vbo.0);
                    self.vbo = Some(vbo);
                    vbo
                }
                Err(e) => {
                    log::error!("failed to create vertex buffer: {e}");
                    return false;
                }
            },
        };

        gl.bind_array_buffer(Some(vbo));
        gl.array_buffer_data(bytemuck::cast_slice(&self.vertices));
        let clean = check_gl(&*gl, "VertexArray::upload");
        gl.bind_array_buffer(None);

        if clean {
            self.uploaded_len = self.vertices.len();
        }
        self.stale = !clean;
        clean
    }

    /// Makes the buffer current for drawing, uploading first if stale.
    ///
    /// Returns false (and does nothing) when the device is unavailable or the
    /// upload failed.
    pub fn bind(&mut self) -> bool {
        if !self.device.is_available() {
            return false;
        }
        if self.stale && !self.upload() {
            return false;
        }
        let Some(gl) = self.device.gl() else {
            return false;
        };
        gl.bind_array_buffer(self.vbo);
        true
    }

    pub fn unbind(&self) {
        if let Some(gl) = self.device.gl() {
            gl.bind_array_buffer(None);
        }
    }

    /// Reads the last uploaded snapshot back from the GPU buffer.
    ///
    /// `None` when nothing was uploaded yet, the device is unavailable, or the
    /// platform cannot read buffers back.
    pub fn read_back(&self) -> Option<Vec<Vertex>> {
        let gl = self.device.gl()?;
        let vbo = self.vbo?;

        gl.bind_array_buffer(Some(vbo));
        let bytes = gl.read_array_buffer(self.uploaded_len * Vertex::STRIDE);
        let clean = check_gl(&*gl, "VertexArray::read_back");
        gl.bind_array_buffer(None);

        let bytes = bytes.filter(|_| clean)?;
        Some(
            bytes
                .chunks_exact(Vertex::STRIDE)
                .map(bytemuck::pod_read_unaligned::<Vertex>)
                .collect(),
        )
    }
}

impl Index<usize> for VertexArray {
    type Output = Vertex;

    fn index(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }
}

impl IndexMut<usize> for VertexArray {
    fn index_mut(&mut self, index: usize) -> &mut Vertex {
        self.stale = true;
        &mut self.vertices[index]
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        let Some(vbo) = self.vbo.take() else {
            return;
        };
        if let Some(gl) = self.device.gl() {
            gl.delete_buffer(vbo);
            check_gl(&*gl, "VertexArray::drop");
        }
    }
}

impl std::fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexArray")
            .field("primitive", &self.primitive)
            .field("vertices", &self.vertices.len())
            .field("vbo", &self.vbo)
            .field("stale", &self.stale)
            .finish()
    }
}
