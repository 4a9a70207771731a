//! Bridging arbitrary payload objects through a byte-only drag-and-drop host.
//!
//! The host's drag-and-drop machinery can only carry plain bytes, so the
//! real payload object lives in a [`PayloadBridge`] while the host moves a
//! placeholder token around. The bridge keeps the object alive for the
//! frame in which it was set and the following one, so a target that
//! accepts on the next frame still receives it.

use std::any::Any;
use std::rc::Rc;

use bitflags::bitflags;

use crate::host::DragDropHost;

bitflags! {
    /// Flags for drag sources and drop targets, mirroring the host's values.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DragDropFlags: u32 {
        const NONE = 0;
        // Source flags
        const SOURCE_NO_PREVIEW_TOOLTIP = 1 << 0;
        const SOURCE_NO_DISABLE_HOVER = 1 << 1;
        const SOURCE_NO_HOLD_TO_OPEN_OTHERS = 1 << 2;
        const SOURCE_ALLOW_NULL_ID = 1 << 3;
        const SOURCE_EXTERN = 1 << 4;
        const SOURCE_AUTO_EXPIRE_PAYLOAD = 1 << 5;
        // Target flags
        const ACCEPT_BEFORE_DELIVERY = 1 << 10;
        const ACCEPT_NO_DRAW_DEFAULT_RECT = 1 << 11;
        const ACCEPT_NO_PREVIEW_TOOLTIP = 1 << 12;
        /// Inspect the payload before delivery without drawing the target rect.
        const ACCEPT_PEEK_ONLY = Self::ACCEPT_BEFORE_DELIVERY.bits()
            | Self::ACCEPT_NO_DRAW_DEFAULT_RECT.bits();
    }
}

/// When a payload set call takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Cond {
    /// Same as `Always`
    #[default]
    None = 0,
    Always = 1,
    Once = 2,
    FirstUseEver = 4,
    Appearing = 8,
}

/// The placeholder handed to the host in place of the real payload.
pub const PAYLOAD_TOKEN: [u8; 4] = 1i32.to_ne_bytes();

/// Holds the payload object of the drag in flight.
///
/// Lifecycle, driven once per frame by [`decay`](Self::decay):
/// - `set` stores the object and grants it two frames of life.
/// - `decay` uses up one frame, or clears the object when none is left.
/// - `accept` hands out the object when the host reported a match.
#[derive(Debug)]
pub struct PayloadBridge<P = Rc<dyn Any>> {
    payload: Option<P>,
    counter: u32,
}

impl<P> Default for PayloadBridge<P> {
    fn default() -> Self {
        Self {
            payload: None,
            counter: 0,
        }
    }
}

impl<P: Clone> PayloadBridge<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held object and keep it alive through the next frame.
    pub fn set(&mut self, payload: P) {
        self.payload = Some(payload);
        self.counter = self.counter.saturating_add(2);
    }

    /// Age the payload by one frame. Call exactly once per frame, after all
    /// set and accept calls of that frame.
    pub fn decay(&mut self) {
        if self.counter > 0 {
            self.counter -= 1;
        } else if self.payload.take().is_some() {
            log::debug!("drag-drop payload expired");
        }
    }

    /// The held object if the host matched a payload, `None` otherwise.
    pub fn accept(&self, matched: bool) -> Option<P> {
        if matched {
            self.payload.clone()
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Remaining frames of guaranteed life.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_live(&self) -> bool {
        self.payload.is_some()
    }

    pub fn clear(&mut self) {
        self.payload = None;
        self.counter = 0;
    }
}

/// Store `payload` in the bridge and publish the placeholder token under
/// `id`. Returns the host's result.
pub fn set_payload<H, P>(
    host: &mut H,
    bridge: &mut PayloadBridge<P>,
    id: &str,
    payload: P,
    cond: Cond,
) -> bool
where
    H: DragDropHost + ?Sized,
    P: Clone,
{
    bridge.set(payload);
    host.set_drag_drop_payload(id, &PAYLOAD_TOKEN, cond)
}

/// Ask the host whether a payload of type `id` is delivered here and, if
/// so, return the bridged object.
pub fn accept_payload<H, P>(
    host: &mut H,
    bridge: &PayloadBridge<P>,
    id: &str,
    flags: DragDropFlags,
) -> Option<P>
where
    H: DragDropHost + ?Sized,
    P: Clone,
{
    let matched = host.accept_drag_drop_payload(id, flags);
    bridge.accept(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockHost {
        published: Vec<(String, Vec<u8>, Cond)>,
        deliver: Option<String>,
    }

    impl DragDropHost for MockHost {
        fn set_drag_drop_payload(&mut self, id: &str, data: &[u8], cond: Cond) -> bool {
            self.published.push((id.to_string(), data.to_vec(), cond));
            false
        }

        fn accept_drag_drop_payload(&mut self, id: &str, _flags: DragDropFlags) -> bool {
            self.deliver.as_deref() == Some(id)
        }
    }

    #[test]
    fn test_payload_survives_two_decays() {
        let mut bridge = PayloadBridge::<i32>::new();
        bridge.set(7);
        assert_eq!(bridge.counter(), 2);

        bridge.decay();
        bridge.decay();
        assert_eq!(bridge.accept(true), Some(7));

        bridge.decay();
        assert_eq!(bridge.accept(true), None);
        assert!(!bridge.is_live());
    }

    #[test]
    fn test_accept_without_match_is_none() {
        let mut bridge = PayloadBridge::<i32>::new();
        bridge.set(1);
        assert_eq!(bridge.accept(false), None);
        assert_eq!(bridge.counter(), 2);
    }

    #[test]
    fn test_repeated_set_accumulates() {
        let mut bridge = PayloadBridge::<&str>::new();
        bridge.set("a");
        bridge.set("b");
        assert_eq!(bridge.counter(), 4);
        assert_eq!(bridge.current(), Some(&"b"));
    }

    #[test]
    fn test_counter_saturates() {
        let mut bridge = PayloadBridge::<u8>::new();
        bridge.counter = u32::MAX - 1;
        bridge.set(1);
        bridge.set(2);
        assert_eq!(bridge.counter(), u32::MAX);
        bridge.decay();
        assert_eq!(bridge.accept(true), Some(2));
    }

    #[test]
    fn test_default_payload_is_any() {
        let mut bridge: PayloadBridge = PayloadBridge::new();
        bridge.set(Rc::new(String::from("layer")));
        let got = bridge.accept(true).unwrap();
        assert_eq!(got.downcast_ref::<String>().map(String::as_str), Some("layer"));
    }

    #[test]
    fn test_host_helpers() {
        let mut host = MockHost::default();
        let mut bridge = PayloadBridge::<u8>::new();

        assert!(!set_payload(&mut host, &mut bridge, "node", 3, Cond::Once));
        assert_eq!(host.published.len(), 1);
        assert_eq!(host.published[0].1, 1i32.to_ne_bytes().to_vec());
        assert_eq!(host.published[0].2, Cond::Once);

        assert_eq!(accept_payload(&mut host, &bridge, "node", DragDropFlags::NONE), None);
        host.deliver = Some("node".into());
        assert_eq!(
            accept_payload(&mut host, &bridge, "node", DragDropFlags::ACCEPT_PEEK_ONLY),
            Some(3)
        );
        assert_eq!(accept_payload(&mut host, &bridge, "other", DragDropFlags::NONE), None);
    }

    #[test]
    fn test_peek_only_combines_flags() {
        assert!(DragDropFlags::ACCEPT_PEEK_ONLY.contains(DragDropFlags::ACCEPT_BEFORE_DELIVERY));
        assert!(DragDropFlags::ACCEPT_PEEK_ONLY.contains(DragDropFlags::ACCEPT_NO_DRAW_DEFAULT_RECT));
    }
}
