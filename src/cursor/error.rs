//! Cursor Controller Error Types

use thiserror::Error;

use crate::driver::DriverError;

/// Result type for cursor operations
pub type Result<T> = std::result::Result<T, CursorError>;

/// Errors raised by cursor commands.
#[derive(Error, Debug)]
pub enum CursorError {
    /// The target element kept relocating; every attempt found it somewhere
    /// else by the time the trajectory finished
    #[error("could not mouse-over target element within {tries} tries")]
    TargetUnreachable {
        /// Attempts made before giving up
        tries: u32,
    },

    /// A driver operation failed
    #[error(transparent)]
    Driver(#[from] DriverError),
}
