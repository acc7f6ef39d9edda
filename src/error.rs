use thiserror::Error;

/// Failures of the gesture interpreter. All of them are local to one
/// component; nothing here is meant to abort the page.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GestureError {
    /// A move/end/cancel arrived without a matching touch-start.
    #[error("touch event received with no active gesture session")]
    InvalidGestureState,
    /// A computed index, scale or translation fell outside its range.
    /// Values are always clamped in place, so this is never returned from
    /// the public touch handlers.
    #[error("{what} out of range: {value}")]
    BoundaryViolation { what: &'static str, value: f64 },
    /// A required element is absent at setup time.
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("invalid gesture config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GestureError>;
