use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// More transforms were popped than are on the stack.
    #[error("cannot pop {requested} transform(s) from a stack of depth {depth}")]
    StackUnderflow { requested: usize, depth: usize },

    /// A vector argument had the wrong number of components.
    #[error("invalid shape for {what}: expected {expected}, got {actual} value(s)")]
    InvalidShape {
        what: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// The draw buffer could not grow to hold the requested vertices.
    #[error("draw buffer cannot grow by {requested} vertices ({available} available)")]
    CapacityFailure { requested: usize, available: usize },

    /// A painter was finished with transforms still pushed.
    #[error("painter finished with {depth} transform(s) still pushed")]
    UnbalancedTransforms { depth: usize },

    /// A host collaborator reported a failure.
    #[error("host error: {0}")]
    Host(String),
}
