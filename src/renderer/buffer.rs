//! Host-owned draw buffer and the reservation primitive used to append to it.

use crate::error::{Error, Result};
use crate::geometry::{Rect, Vec2};

use super::vertex::{DrawIdx, DrawVert};

/// Opaque handle to a texture uploaded by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u64);

impl TextureId {
    /// The font atlas, which also holds the white pixel used for solid fills.
    pub const FONT_ATLAS: TextureId = TextureId(0);
}

/// A contiguous run of indices sharing one clip rect and texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCmd {
    pub clip_rect: Rect,
    pub texture_id: TextureId,
    /// Offset added to every index of this command
    pub vtx_offset: u32,
    /// First index of this command in the index buffer
    pub idx_offset: u32,
    /// Number of indices
    pub elem_count: u32,
}

/// Append-only vertex and index storage for one frame.
///
/// The buffer is owned by the host renderer, which clears it at the start
/// of every frame. Drawing code only ever appends through
/// [`DrawBuffer::reserve`]; the vertex cursor never moves backwards.
#[derive(Debug, Clone)]
pub struct DrawBuffer {
    vertices: Vec<DrawVert>,
    indices: Vec<DrawIdx>,
    commands: Vec<DrawCmd>,
    clip_stack: Vec<Rect>,
    texture_stack: Vec<TextureId>,
    viewport: Rect,
    white_pixel_uv: [f32; 2],
    vertex_limit: Option<usize>,
}

impl DrawBuffer {
    /// Create an empty buffer clipped to `viewport`.
    pub fn new(viewport: Rect) -> Self {
        let mut buffer = Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            commands: Vec::new(),
            clip_stack: Vec::with_capacity(4),
            texture_stack: Vec::with_capacity(4),
            viewport,
            white_pixel_uv: [0.0, 0.0],
            vertex_limit: None,
        };
        buffer.clear();
        buffer
    }

    /// Set the uv of the atlas's white pixel, used for untextured geometry.
    pub fn with_white_pixel_uv(mut self, uv: [f32; 2]) -> Self {
        self.white_pixel_uv = uv;
        self
    }

    /// Cap the number of vertices the buffer may hold.
    pub fn with_vertex_limit(mut self, limit: usize) -> Self {
        self.vertex_limit = Some(limit);
        self
    }

    /// Reset for a new frame, preserving allocated capacity.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.commands.clear();
        self.clip_stack.clear();
        self.texture_stack.clear();
        self.commands.push(DrawCmd {
            clip_rect: self.viewport,
            texture_id: TextureId::FONT_ATLAS,
            vtx_offset: 0,
            idx_offset: 0,
            elem_count: 0,
        });
    }

    /// Number of vertices written so far; the absolute offset of the next vertex.
    pub fn vertex_cursor(&self) -> usize {
        self.vertices.len()
    }

    pub fn white_pixel_uv(&self) -> [f32; 2] {
        self.white_pixel_uv
    }

    pub fn vertices(&self) -> &[DrawVert] {
        &self.vertices
    }

    pub fn indices(&self) -> &[DrawIdx] {
        &self.indices
    }

    /// Draw commands, skipping a trailing empty one.
    pub fn commands(&self) -> &[DrawCmd] {
        match self.commands.last() {
            Some(last) if last.elem_count == 0 => &self.commands[..self.commands.len() - 1],
            _ => &self.commands,
        }
    }

    /// Vertices from `start` to the cursor, for in-place rewriting of a
    /// primitive that was just emitted.
    pub(crate) fn vertices_from_mut(&mut self, start: usize) -> &mut [DrawVert] {
        let start = start.min(self.vertices.len());
        &mut self.vertices[start..]
    }

    /// Current clip rect (the viewport when nothing is pushed).
    pub fn clip_rect(&self) -> Rect {
        self.clip_stack.last().copied().unwrap_or(self.viewport)
    }

    /// Push a clip rect. With `intersect` it is clipped against the current one.
    pub fn push_clip_rect(&mut self, min: Vec2, max: Vec2, intersect: bool) {
        let mut rect = Rect::new(min, max);
        if intersect {
            rect = rect.intersect(&self.clip_rect());
        }
        self.clip_stack.push(rect);
        self.on_state_changed();
    }

    /// Pop the last clip rect. Returns `false` if none was pushed.
    pub fn pop_clip_rect(&mut self) -> bool {
        let popped = self.clip_stack.pop().is_some();
        if popped {
            self.on_state_changed();
        }
        popped
    }

    pub fn texture_id(&self) -> TextureId {
        self.texture_stack
            .last()
            .copied()
            .unwrap_or(TextureId::FONT_ATLAS)
    }

    pub fn push_texture_id(&mut self, texture: TextureId) {
        self.texture_stack.push(texture);
        self.on_state_changed();
    }

    pub fn pop_texture_id(&mut self) -> bool {
        let popped = self.texture_stack.pop().is_some();
        if popped {
            self.on_state_changed();
        }
        popped
    }

    /// Start a new command when clip rect or texture changed, reusing the
    /// current one if nothing was drawn into it yet.
    fn on_state_changed(&mut self) {
        let clip_rect = self.clip_rect();
        let texture_id = self.texture_id();
        let idx_offset = self.indices.len() as u32;

        match self.commands.last_mut() {
            Some(cmd) if cmd.elem_count == 0 => {
                cmd.clip_rect = clip_rect;
                cmd.texture_id = texture_id;
                cmd.idx_offset = idx_offset;
            }
            _ => self.commands.push(DrawCmd {
                clip_rect,
                texture_id,
                vtx_offset: 0,
                idx_offset,
                elem_count: 0,
            }),
        }
    }

    /// Reserve `vertex_count` vertices and `index_count` indices at the end
    /// of the buffer.
    ///
    /// The cursor and index write position advance immediately; the caller
    /// fills the returned writer. Earlier ranges are never invalidated.
    pub fn reserve(&mut self, vertex_count: usize, index_count: usize) -> Result<PrimWriter<'_>> {
        let base = self.vertices.len();
        let max_vertices = self
            .vertex_limit
            .unwrap_or(usize::MAX)
            .min(DrawIdx::MAX as usize + 1);
        let available = max_vertices.saturating_sub(base);
        if vertex_count > available {
            return Err(Error::CapacityFailure {
                requested: vertex_count,
                available,
            });
        }

        let elem_count = self.commands.last().map_or(0, |cmd| cmd.elem_count);
        let index_room = (u32::MAX - elem_count) as usize;
        if index_count > index_room {
            return Err(Error::CapacityFailure {
                requested: index_count,
                available: index_room,
            });
        }

        self.vertices
            .try_reserve(vertex_count)
            .and_then(|_| self.indices.try_reserve(index_count))
            .map_err(|_| Error::CapacityFailure {
                requested: vertex_count,
                available,
            })?;

        let idx_start = self.indices.len();
        self.vertices.resize(base + vertex_count, DrawVert::default());
        self.indices.resize(idx_start + index_count, 0);
        if let Some(cmd) = self.commands.last_mut() {
            cmd.elem_count += index_count as u32;
        }

        Ok(PrimWriter {
            base: base as DrawIdx,
            vertices: &mut self.vertices[base..],
            indices: &mut self.indices[idx_start..],
        })
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::new(Rect::new(Vec2::ZERO, Vec2::splat(f32::MAX)))
    }
}

/// Write access to one reserved range of a [`DrawBuffer`].
///
/// Vertices are addressed relative to the reservation; indices are given
/// relative too and stored as absolute offsets (`base + local`).
pub struct PrimWriter<'a> {
    base: DrawIdx,
    vertices: &'a mut [DrawVert],
    indices: &'a mut [DrawIdx],
}

impl PrimWriter<'_> {
    /// Absolute offset of the first reserved vertex.
    pub fn base(&self) -> DrawIdx {
        self.base
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn vertex(&mut self, i: usize, pos: Vec2, uv: [f32; 2], col: u32) {
        self.vertices[i] = DrawVert::new(pos.to_array(), uv, col);
    }

    #[inline]
    pub fn index(&mut self, i: usize, local: usize) {
        debug_assert!(local < self.vertices.len());
        self.indices[i] = self.base + local as DrawIdx;
    }

    /// Write triangle `t` (indices `3t..3t+3`).
    #[inline]
    pub fn triangle(&mut self, t: usize, a: usize, b: usize, c: usize) {
        self.index(t * 3, a);
        self.index(t * 3 + 1, b);
        self.index(t * 3 + 2, c);
    }
}
