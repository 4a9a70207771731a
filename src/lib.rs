//! Immediate-mode 2D vector drawing under a stack of affine transforms.
//!
//! Geometry is tessellated in local coordinates into a host-owned
//! [`DrawBuffer`] and then mapped in place by the current [`Transform`],
//! so plots, rotated widgets and window-relative overlays can all be drawn
//! with the same primitives. A [`PayloadBridge`] carries arbitrary objects
//! through a host's byte-only drag-and-drop machinery.

pub mod color;
pub mod config;
pub mod context;
pub mod dragdrop;
pub mod draw_stats;
pub mod error;
pub mod geometry;
pub mod host;
pub mod renderer;
pub mod transform;
pub mod transform_stack;

pub use color::Color;
pub use config::{DrawConfig, LineCap};
pub use context::Context;
pub use dragdrop::{Cond, DragDropFlags, PayloadBridge};
pub use error::{Error, Result};
pub use geometry::{vec2, Rect, Vec2};
pub use host::{DragDropHost, HostFrame, TextRenderer};
pub use renderer::{DrawBuffer, DrawCmd, DrawIdx, DrawVert, Painter, TextureId};
pub use transform::Transform;
pub use transform_stack::TransformStack;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::config::{DrawConfig, LineCap};
    pub use crate::context::Context;
    pub use crate::dragdrop::{Cond, DragDropFlags, PayloadBridge};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{vec2, Rect, Vec2};
    pub use crate::host::{DragDropHost, HostFrame, TextRenderer};
    pub use crate::renderer::{DrawBuffer, Painter, TextureId};
    pub use crate::transform::Transform;
}
