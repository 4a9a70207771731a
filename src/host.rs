//! Traits implemented by the host GUI toolkit.
//!
//! The drawing core never talks to a window system, font rasteriser or
//! drag-and-drop machinery directly. It only needs the small surfaces
//! below, which a host backend implements on top of its own state.

use crate::dragdrop::{Cond, DragDropFlags};
use crate::error::Result;
use crate::geometry::Vec2;
use crate::renderer::DrawBuffer;

/// Tessellates text into a draw buffer.
///
/// The core treats the emitted geometry as opaque: it only records the
/// vertex cursor before and after the call so the current transform can be
/// applied to whatever was written.
pub trait TextRenderer {
    /// Append the glyph quads of `text` with its top-left at `position`.
    fn add_text(
        &mut self,
        buffer: &mut DrawBuffer,
        position: Vec2,
        color: u32,
        text: &str,
    ) -> Result<()>;
}

/// Frame state of the window and plot currently being drawn into.
pub trait HostFrame {
    /// Map plot coordinates to pixel coordinates.
    fn plot_to_pixels(&self, x: f64, y: f64) -> (f64, f64);

    /// Top-left corner of the current window in pixels.
    fn window_pos(&self) -> Vec2;
}

/// The host's native drag-and-drop matcher.
///
/// Only an opaque byte token crosses this boundary; the real payload object
/// is kept in a [`PayloadBridge`](crate::PayloadBridge).
pub trait DragDropHost {
    /// Publish `data` as the payload of type `id` from the active drag source.
    /// Returns whether the payload was accepted by a target this frame.
    fn set_drag_drop_payload(&mut self, id: &str, data: &[u8], cond: Cond) -> bool;

    /// Whether a payload of type `id` is being delivered to the active drop
    /// target, honouring `flags`.
    fn accept_drag_drop_payload(&mut self, id: &str, flags: DragDropFlags) -> bool;
}

impl<T: TextRenderer + ?Sized> TextRenderer for &mut T {
    fn add_text(
        &mut self,
        buffer: &mut DrawBuffer,
        position: Vec2,
        color: u32,
        text: &str,
    ) -> Result<()> {
        (**self).add_text(buffer, position, color, text)
    }
}

impl<T: HostFrame + ?Sized> HostFrame for &T {
    fn plot_to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
        (**self).plot_to_pixels(x, y)
    }

    fn window_pos(&self) -> Vec2 {
        (**self).window_pos()
    }
}
