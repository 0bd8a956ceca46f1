//! Builder-style configuration for the logger.
//!
//! [`crate::init`] covers the common case; this builder additionally
//! exposes the rotation knobs.

use std::path::PathBuf;

use crate::level::LogLevel;
use crate::logger::{init_with, DEFAULT_MAX_RECORDS};
use crate::rotation::DEFAULT_MAX_ROTATED_FILES;

/// Configuration for [`install`](LoggerConfig::install)-ing the logger.
///
/// ```ignore
/// use logtree_core::{LoggerConfig, LogLevel};
///
/// LoggerConfig::new(LogLevel::Info, "log.json")
///     .max_records(100)
///     .max_rotated_files(3)
///     .install();
/// ```
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    threshold: LogLevel,
    primary_path: PathBuf,
    max_records: u64,
    max_rotated_files: usize,
}

impl LoggerConfig {
    /// Start from the defaults: rotate at 500 records, retain 5 files.
    pub fn new(threshold: LogLevel, primary_path: impl Into<PathBuf>) -> Self {
        Self {
            threshold,
            primary_path: primary_path.into(),
            max_records: DEFAULT_MAX_RECORDS,
            max_rotated_files: DEFAULT_MAX_ROTATED_FILES,
        }
    }

    /// Accepted-record count that triggers an implicit rotation
    /// (clamped to at least 1).
    pub fn max_records(mut self, max_records: u64) -> Self {
        self.max_records = max_records;
        self
    }

    /// Bound on retained rotated files (clamped to at least 1).
    pub fn max_rotated_files(mut self, max_rotated_files: usize) -> Self {
        self.max_rotated_files = max_rotated_files;
        self
    }

    /// Initialize the process-wide logger with this configuration.
    ///
    /// Same semantics as [`crate::init`]: an existing tree and its
    /// records are kept.
    pub fn install(self) {
        init_with(
            self.threshold,
            self.primary_path,
            self.max_records,
            self.max_rotated_files,
        );
    }
}
