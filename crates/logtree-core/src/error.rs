//! Error types for logtree

use thiserror::Error;

/// Errors raised by internal logger operations.
///
/// The public operations never surface these: per the crate's contract
/// they return `()` and degrade to a no-op on failure. Internally every
/// fallible step (serialization, snapshot writes, eviction) goes through
/// this type so failure handling stays in one place.
#[derive(Error, Debug)]
pub enum LogError {
    /// Snapshot file could not be opened or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tree could not be rendered as JSON text
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;

/// Report a failed internal check.
///
/// Debug builds abort via `debug_assert!`; release builds print the
/// single stderr contract line and carry on.
macro_rules! soft_assert {
    ($cond:expr, $func:expr) => {{
        let ok = $cond;
        if !ok {
            debug_assert!(ok);
            eprintln!("Assertion at [{}:{}:{}] failed", file!(), $func, line!());
        }
    }};
}

pub(crate) use soft_assert;
