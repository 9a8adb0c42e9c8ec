//! Driver Error Types
//!
//! Failures reported by the browser-automation collaborator.

use thiserror::Error;

/// Result type for driver operations
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors surfaced by a [`PointerDriver`](super::PointerDriver)
/// implementation.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Selector could not be resolved to an element
    #[error("selector resolution failed: {0}")]
    Selector(String),

    /// Element disappeared or never appeared within the wait budget
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// Low-level pointer I/O failed
    #[error("pointer I/O failed: {0}")]
    Pointer(String),

    /// Low-level protocol session error (node inspection, scrolling)
    #[error("protocol session error: {0}")]
    Protocol(String),

    /// The browser session is no longer connected
    #[error("browser session disconnected")]
    Disconnected,

    /// The driver could not report a viewport size
    #[error("viewport size unavailable")]
    ViewportUnavailable,
}
