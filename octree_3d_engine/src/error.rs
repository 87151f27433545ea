//! Error types for the Octree3D engine
//!
//! This module defines the error types used throughout the engine,
//! including configuration, body validation, and node bookkeeping.

use std::fmt;

/// Result type for Octree3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Octree3D engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Octree configuration rejected (depth, root size, root center)
    InvalidConfig(String),

    /// Body reports an unusable position or radius
    InvalidBody(String),

    /// A node key no longer resolves in the node arena
    StaleNode(String),

    /// Operation requires a tracked body (known key, current node set)
    UntrackedBody(String),

    /// Registry or occupancy bookkeeping is inconsistent
    InvariantViolation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::InvalidBody(msg) => write!(f, "Invalid body: {}", msg),
            Error::StaleNode(msg) => write!(f, "Stale node: {}", msg),
            Error::UntrackedBody(msg) => write!(f, "Untracked body: {}", msg),
            Error::InvariantViolation(msg) => write!(f, "Invariant violation: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error` variant and log it at ERROR severity
///
/// # Example
///
/// ```no_run
/// use octree_3d_engine::engine_err;
///
/// let err = engine_err!("octree3d::Config", InvalidConfig, "max_depth {} too large", 12);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::octree3d::Error::$variant(message)
    }};
}

/// Log an error and return it from the enclosing function
///
/// # Example
///
/// ```no_run
/// use octree_3d_engine::engine_bail;
/// use octree_3d_engine::octree3d::Result;
///
/// fn check(depth: u32) -> Result<()> {
///     if depth > 7 {
///         engine_bail!("octree3d::Config", InvalidConfig, "max_depth {} too large", depth);
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($($arg:tt)*) => {
        return Err($crate::engine_err!($($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
