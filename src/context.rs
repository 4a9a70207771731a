use std::any::Any;
use std::rc::Rc;

use crate::config::DrawConfig;
use crate::dragdrop::{self, Cond, DragDropFlags, PayloadBridge};
use crate::draw_stats;
use crate::host::DragDropHost;
use crate::renderer::{DrawBuffer, Painter};

/// Per-application drawing state that outlives a single frame.
///
/// A context owns the drawing defaults and the drag-and-drop payload
/// bridge. The host drives it with [`begin_frame`](Self::begin_frame) and
/// [`end_frame`](Self::end_frame) and creates a [`Painter`] for each draw
/// buffer it wants to fill in between.
#[derive(Debug)]
pub struct Context<P = Rc<dyn Any>> {
    config: DrawConfig,
    payloads: PayloadBridge<P>,
    in_frame: bool,
    frame: u64,
}

impl<P: Clone> Default for Context<P> {
    fn default() -> Self {
        Self::with_config(DrawConfig::default())
    }
}

impl<P: Clone> Context<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DrawConfig) -> Self {
        Self {
            config,
            payloads: PayloadBridge::default(),
            in_frame: false,
            frame: 0,
        }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DrawConfig) {
        self.config = config;
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn begin_frame(&mut self) {
        if self.in_frame {
            log::warn!("begin_frame called twice without end_frame");
        }
        self.in_frame = true;
        log::debug!("begin frame {}", self.frame);
    }

    /// Finish the frame. Ages the drag-and-drop payload by one frame, so
    /// this must come after every set and accept call of the frame.
    pub fn end_frame(&mut self) {
        if !self.in_frame {
            log::warn!("end_frame called outside a frame");
        }
        self.payloads.decay();
        self.in_frame = false;
        draw_stats::end_frame();
        log::debug!("end frame {}", self.frame);
        self.frame += 1;
    }

    /// Start drawing into `buffer` with this context's defaults.
    pub fn painter<'b>(&self, buffer: &'b mut DrawBuffer) -> Painter<'b> {
        Painter::with_config(buffer, self.config.clone())
    }

    /// Start a drag carrying `payload` under the type `id`.
    pub fn set_payload<H: DragDropHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &str,
        payload: P,
        cond: Cond,
    ) -> bool {
        dragdrop::set_payload(host, &mut self.payloads, id, payload, cond)
    }

    /// Receive a payload of type `id` if the host is delivering one here.
    pub fn accept_payload<H: DragDropHost + ?Sized>(
        &self,
        host: &mut H,
        id: &str,
        flags: DragDropFlags,
    ) -> Option<P> {
        dragdrop::accept_payload(host, &self.payloads, id, flags)
    }

    pub fn payloads(&self) -> &PayloadBridge<P> {
        &self.payloads
    }
}
