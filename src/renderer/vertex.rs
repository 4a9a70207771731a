//! Vertex and index formats shared by every primitive.
//!
//! The layout matches what immediate-mode GUI backends consume: position,
//! texture coordinate and a packed color, tightly packed so a host can
//! upload the vertex slice with `bytemuck::cast_slice`.

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// Index type of the draw buffer. Indices are absolute vertex offsets.
pub type DrawIdx = u32;

/// A single draw-buffer vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawVert {
    /// Position in logical pixels
    pub pos: [f32; 2],
    /// Texture coordinates
    pub uv: [f32; 2],
    /// RGBA color, R in the low byte
    pub col: u32,
}

impl DrawVert {
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        // pos
        VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: VertexFormat::Float32x2,
        },
        // uv
        VertexAttribute {
            offset: 8,
            shader_location: 1,
            format: VertexFormat::Float32x2,
        },
        // col
        VertexAttribute {
            offset: 16,
            shader_location: 2,
            format: VertexFormat::Unorm8x4,
        },
    ];

    pub fn new(pos: [f32; 2], uv: [f32; 2], col: u32) -> Self {
        Self { pos, uv, col }
    }

    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<DrawVert>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<DrawVert>(), 20);
        let desc = DrawVert::desc();
        assert_eq!(desc.array_stride, 20);
        assert_eq!(desc.attributes.len(), 3);
        assert_eq!(desc.attributes[2].offset, 16);
    }

    #[test]
    fn test_cast_to_bytes() {
        let verts = [DrawVert::new([1.0, 2.0], [0.0, 0.0], 0xFFFF_FFFF); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 40);
    }
}
