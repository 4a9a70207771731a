//! Stack of pre-composed transforms.

use crate::error::{Error, Result};
use crate::transform::Transform;

/// A stack of nested transforms.
///
/// Every entry already holds the composition of itself with all entries
/// below it, so the effective transform is always just the top of the
/// stack (or identity when empty). A transform pushed while another one is
/// active is interpreted inside the parent's frame.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    stack: Vec<Transform>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(4),
        }
    }

    /// Push `transform` in the frame of the current top.
    pub fn push(&mut self, transform: Transform) {
        let composed = match self.stack.last() {
            Some(top) => transform.within(top),
            None => transform,
        };
        self.stack.push(composed);
    }

    /// Pop `count` entries.
    ///
    /// Popping more than the current depth is a push/pop mismatch; the
    /// stack is left untouched and [`Error::StackUnderflow`] is returned.
    pub fn pop(&mut self, count: usize) -> Result<()> {
        let depth = self.stack.len();
        if count > depth {
            return Err(Error::StackUnderflow {
                requested: count,
                depth,
            });
        }
        self.stack.truncate(depth - count);
        Ok(())
    }

    /// The effective transform, or `None` when nothing is pushed.
    pub fn top(&self) -> Option<&Transform> {
        self.stack.last()
    }

    /// The effective transform (identity when empty).
    pub fn current(&self) -> Transform {
        self.top().copied().unwrap_or(Transform::IDENTITY)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}
