//! The process-wide logger: lifecycle, shared state and the public
//! operations.
//!
//! Exactly one logger exists per process. Callers never hold a handle:
//! every public operation reaches the module-private singleton through an
//! accessor, the way the original calling convention hides the instance.
//!
//! ## Locking
//!
//! Two mutexes guard the shared state:
//!
//! - `tree`: the whole log tree (structure and records)
//! - `settings`: threshold, primary path, record counter, rotated-file
//!   registry and lifecycle state
//!
//! Total order: `tree` strictly before `settings`. A holder of only
//! `settings` never takes `tree`. Implicit rotation runs while the
//! triggering call still holds `tree`, so a rotation never splits the
//! records of one call across two files.

use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::Local;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::soft_assert;
use crate::level::{self, LogLevel};
use crate::parser::{self, Emit, FormatArg};
use crate::record::{CallOrigin, LogRecord};
use crate::rotation::{rotated_path, RotationQueue, DEFAULT_MAX_ROTATED_FILES};
use crate::sink::write_snapshot;
use crate::tree::{segment_is_valid, LogTree};

/// Default accepted-record count that triggers an implicit rotation.
pub(crate) const DEFAULT_MAX_RECORDS: u64 = 500;

/// Lifecycle of the process-wide logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Uninitialized,
    Active,
    Destroyed,
}

/// Everything guarded by the settings lock.
struct Settings {
    lifecycle: Lifecycle,
    threshold: Option<LogLevel>,
    primary_path: Option<PathBuf>,
    record_count: u64,
    max_records: u64,
    rotated: RotationQueue,
}

impl Settings {
    fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            threshold: None,
            primary_path: None,
            record_count: 0,
            max_records: DEFAULT_MAX_RECORDS,
            rotated: RotationQueue::new(DEFAULT_MAX_ROTATED_FILES),
        }
    }
}

struct Logger {
    tree: Mutex<Option<LogTree>>,
    settings: Mutex<Settings>,
}

fn global() -> &'static Logger {
    static LOGGER: OnceLock<Logger> = OnceLock::new();
    LOGGER.get_or_init(|| Logger {
        tree: Mutex::new(None),
        settings: Mutex::new(Settings::new()),
    })
}

/// Initialize (or re-initialize) the logger.
///
/// Installs the threshold and primary path and creates an empty tree if
/// none exists. Re-initialization deliberately keeps accumulated records;
/// only [`destroy`] resets the tree.
pub fn init(threshold: LogLevel, primary_path: impl Into<PathBuf>) {
    init_with(
        threshold,
        primary_path.into(),
        DEFAULT_MAX_RECORDS,
        DEFAULT_MAX_ROTATED_FILES,
    );
}

pub(crate) fn init_with(
    threshold: LogLevel,
    primary_path: PathBuf,
    max_records: u64,
    max_rotated_files: usize,
) {
    let logger = global();
    {
        let mut tree = logger.tree.lock();
        if tree.is_none() {
            *tree = Some(LogTree::new());
        }
    }

    let mut settings = logger.settings.lock();
    settings.threshold = Some(threshold);
    settings.primary_path = Some(primary_path);
    settings.max_records = max_records.max(1);
    settings.rotated.set_capacity(max_rotated_files.max(1));
    settings.lifecycle = Lifecycle::Active;
}

/// Dump the tree to the primary path, then tear everything down.
///
/// The tree, primary path and rotated-file registry are dropped, the
/// counter and threshold reset. Files already on disk stay. Idempotent;
/// re-initialization afterwards is permitted.
pub fn destroy() {
    dump();

    let logger = global();
    {
        let mut tree = logger.tree.lock();
        *tree = None;
    }

    let mut settings = logger.settings.lock();
    settings.lifecycle = Lifecycle::Destroyed;
    settings.threshold = None;
    settings.primary_path = None;
    settings.record_count = 0;
    settings.rotated.clear();
}

/// Replace the severity threshold.
///
/// Works in every lifecycle state; records already accepted under an
/// older threshold are retained.
pub fn set_threshold(level: LogLevel) {
    global().settings.lock().threshold = Some(level);
}

/// Log through the template mini-language.
///
/// `template` may carry `%1` node directives (each consuming the next
/// argument as a child node name) and printf-style conversions formatted
/// against the remaining arguments; see the crate docs for the full
/// grammar. Prefer the `log_*!` macros, which also attach call site
/// metadata.
pub fn log(level: LogLevel, template: &str, args: &[FormatArg]) {
    if !accept(level) {
        return;
    }

    let Some(parsed) = parser::parse(template, args) else {
        return;
    };

    commit(level, parsed.path, parsed.emits, parsed.origin);
}

/// Log a pre-formatted message under an explicit node path.
///
/// The structured twin of [`log`]: no template decoding, one record at
/// the path's leaf. An empty `path` logs at the root.
pub fn log_at(level: LogLevel, path: &[&str], message: impl Into<String>) {
    if !accept(level) {
        return;
    }

    let path: Vec<String> = path.iter().map(|s| s.to_string()).collect();
    let emit = Emit {
        depth: path.len(),
        message: message.into(),
    };
    commit(level, path, vec![emit], None);
}

/// Serialize the current tree and rewrite the primary path in full.
///
/// An empty tree writes `{}`. A no-op unless the logger is active.
pub fn dump() {
    let logger = global();

    let json = {
        let tree_guard = logger.tree.lock();
        let Some(tree) = tree_guard.as_ref() else {
            return;
        };
        match tree.to_pretty_json() {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "failed to serialize log tree");
                return;
            }
        }
    };

    let path = {
        let settings = logger.settings.lock();
        if settings.lifecycle != Lifecycle::Active {
            return;
        }
        match settings.primary_path.clone() {
            Some(path) => path,
            None => return,
        }
    };

    match write_snapshot(&path, &json) {
        Ok(()) => debug!(path = %path.display(), "dumped log tree"),
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to write log snapshot");
            soft_assert!(false, "dump");
        }
    }
}

/// Explicitly rotate: move the tree to a timestamped file and reset it.
///
/// A no-op unless the logger is active.
pub fn rotate() {
    let logger = global();
    let mut tree_guard = logger.tree.lock();
    let Some(tree) = tree_guard.as_mut() else {
        return;
    };

    let mut settings = logger.settings.lock();
    if settings.lifecycle != Lifecycle::Active {
        return;
    }
    rotate_locked(tree, &mut settings);
}

/// Severity and lifecycle gate, queried before any parsing work.
fn accept(level: LogLevel) -> bool {
    let (accepted, active) = {
        let settings = global().settings.lock();
        (
            level::accepts(settings.threshold, level),
            settings.lifecycle == Lifecycle::Active,
        )
    };

    if !accepted {
        return false;
    }
    if !active {
        debug_assert!(false, "accepted log call while the logger is not active");
        return false;
    }
    true
}

/// Apply one decoded call to the tree and run the implicit-rotation check.
fn commit(level: LogLevel, path: Vec<String>, emits: Vec<Emit>, origin: Option<CallOrigin>) {
    if !path.iter().all(|segment| segment_is_valid(segment)) {
        warn!(?path, "dropping log call with reserved or empty node name");
        debug_assert!(false, "reserved or empty node name in log path");
        return;
    }

    let logger = global();
    let mut tree_guard = logger.tree.lock();
    let Some(tree) = tree_guard.as_mut() else {
        debug_assert!(false, "accepted log call while the logger is not active");
        return;
    };

    tree.ensure_path(&path);

    let mut appended = 0u64;
    for emit in emits {
        let record = LogRecord::new(level, emit.message, origin.clone());
        if tree.append_record(&path[..emit.depth], record) {
            appended += 1;
        }
    }

    if appended == 0 {
        return;
    }

    let mut settings = logger.settings.lock();
    settings.record_count += appended;
    if settings.record_count >= settings.max_records {
        rotate_locked(tree, &mut settings);
    }
}

/// The rotation procedure. Caller holds both locks.
///
/// Order matters: the counter resets first, evicted files leave the disk
/// before the new file is written, and the tree is cleared only after a
/// successful write.
fn rotate_locked(tree: &mut LogTree, settings: &mut Settings) {
    settings.record_count = 0;

    let Some(primary) = settings.primary_path.as_deref() else {
        return;
    };
    let rotated = rotated_path(primary, Local::now());

    for old in settings.rotated.push(rotated.clone()) {
        if let Err(err) = std::fs::remove_file(&old) {
            warn!(path = %old.display(), %err, "failed to delete evicted log file");
        }
    }

    let json = match tree.to_pretty_json() {
        Ok(json) => json,
        Err(err) => {
            warn!(%err, "failed to serialize log tree for rotation");
            return;
        }
    };

    match write_snapshot(&rotated, &json) {
        Ok(()) => {
            debug!(path = %rotated.display(), "rotated log tree");
            tree.clear();
        }
        Err(err) => {
            warn!(path = %rotated.display(), %err, "failed to write rotated log file");
            soft_assert!(false, "rotate");
        }
    }
}

/// Guard that destroys the logger when dropped.
///
/// The stand-in for a process-exit hook: hold one for the lifetime of
/// `main` and the final tree is flushed to the primary path on the way
/// out. [`destroy`] is idempotent, so an explicit call alongside a guard
/// is harmless.
#[must_use = "the logger is destroyed as soon as the guard is dropped"]
#[derive(Debug, Default)]
pub struct ShutdownGuard {
    _private: (),
}

impl ShutdownGuard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        destroy();
    }
}
