//! Error types for the HeartCare scene manager
//!
//! This module defines the error taxonomy used throughout the crate:
//! fatal mount failures (initialization, render surface), per-step teardown
//! failures, and backend/resource/configuration errors.

use std::fmt;

/// Result type for HeartCare scene operations
pub type Result<T> = std::result::Result<T, Error>;

/// HeartCare scene errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Geometry or material construction failed (invalid extrusion parameters, etc.)
    InitializationFailed(String),

    /// Mount container missing or graphics context cannot be created
    RenderSurfaceUnavailable(String),

    /// One teardown step failed; remaining steps still ran
    TeardownPartialFailure(String),

    /// Invalid resource handle (unknown or already disposed)
    InvalidResource(String),

    /// Backend-specific error (device lost, poisoned lock, etc.)
    BackendError(String),

    /// Configuration rejected by validation
    InvalidConfig(String),
}

impl Error {
    /// Whether this error aborts a mount (the animation loop must not start)
    pub fn is_fatal_to_mount(&self) -> bool {
        matches!(
            self,
            Error::InitializationFailed(_)
                | Error::RenderSurfaceUnavailable(_)
                | Error::InvalidConfig(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::RenderSurfaceUnavailable(msg) => write!(f, "Render surface unavailable: {}", msg),
            Error::TeardownPartialFailure(msg) => write!(f, "Teardown step failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an [`Error`] of the given kind and log it at ERROR severity
///
/// # Example
///
/// ```no_run
/// # use heartcare_scene::scene_err;
/// let depth = -1.0;
/// let err = scene_err!(InitializationFailed, "heartcare::Extrude", "depth must be > 0, got {}", depth);
/// ```
#[macro_export]
macro_rules! scene_err {
    ($kind:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::scene_error!($source, "{}", message);
        $crate::heartcare::Error::$kind(message)
    }};
}

/// Log and return an [`Error`] of the given kind from the current function
///
/// # Example
///
/// ```no_run
/// # use heartcare_scene::scene_bail;
/// # fn check(count: usize) -> heartcare_scene::heartcare::Result<()> {
/// if count == 0 {
///     scene_bail!(InvalidConfig, "heartcare::Config", "count must be > 0");
/// }
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! scene_bail {
    ($kind:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::scene_err!($kind, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
