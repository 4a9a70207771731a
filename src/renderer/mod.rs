//! Tessellation into host draw buffers.
//!
//! [`Painter`] is the entry point: it tessellates primitives in local space
//! through [`tessellate`], then maps the freshly written vertices through
//! the current transform.

pub mod buffer;
pub mod painter;
mod retransform;
pub mod tessellate;
pub mod vertex;

pub use buffer::{DrawBuffer, DrawCmd, PrimWriter, TextureId};
pub use painter::Painter;
pub use retransform::apply_transform;
pub use vertex::{DrawIdx, DrawVert};
