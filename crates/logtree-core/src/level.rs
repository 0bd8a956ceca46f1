//! Severity levels and the threshold filter.
//!
//! Levels are ordered most- to least-severe; a record is accepted when its
//! level is equally or more severe than the configured threshold. The
//! threshold itself lives behind `Option<LogLevel>`: `None` means "nothing
//! configured yet", which rejects everything.

use serde::{Deserialize, Serialize};

/// Severity of a single log record.
///
/// Declaration order doubles as the ordering: `Critical` compares lowest,
/// so `level <= threshold` reads "at least as severe as the threshold".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Unrecoverable conditions
    Critical,
    /// Failures the process survives
    Error,
    /// Suspicious but non-failing conditions
    Warn,
    /// Routine operational messages
    Info,
    /// High-volume developer detail
    Debug,
}

impl LogLevel {
    /// Uppercase name used in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold acceptance check.
///
/// True iff a threshold has been configured and `level` is equally or
/// more severe. Deliberately ignores the logger lifecycle: the lifecycle
/// is enforced at the tree boundary so an accepted level against a
/// missing tree is still detectable.
pub(crate) fn accepts(threshold: Option<LogLevel>, level: LogLevel) -> bool {
    match threshold {
        Some(t) => level <= t,
        None => false,
    }
}
