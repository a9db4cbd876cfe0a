//! Custom error types for ellipsize.

use thiserror::Error;

/// Errors that can occur at the fallible edges of ellipsize.
///
/// The truncation pipeline itself never fails; these cover parsing of
/// user-supplied options and loading content from disk.
#[derive(Error, Debug)]
pub enum EllipsisError {
    /// Direction string was not one of `start`, `end` or `middle`.
    #[error("invalid direction `{0}` (expected start, end or middle)")]
    InvalidDirection(String),

    /// Width string was neither `auto` nor a pixel number.
    #[error("invalid width `{0}` (expected auto or a number of pixels)")]
    InvalidWidth(String),

    /// The terminal has no room to render the demo.
    #[error("terminal area too small to render")]
    AreaTooSmall,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
