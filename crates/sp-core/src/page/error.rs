use thiserror::Error;

/// Failures raised by page DOM operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("selection [{start}, {end}) is outside a value of length {len}")]
    IndexSize { start: usize, end: usize, len: usize },

    #[error("element is no longer attached to the document")]
    Detached,

    #[error("document is unavailable: {0}")]
    Unavailable(String),
}
