//! logtree: an in-process structured logger backed by a JSON tree.
//!
//! Records are not appended line-by-line to a text file. They accumulate
//! in an in-memory tree keyed by caller-supplied path components, and the
//! whole tree is rewritten to disk as one pretty-printed JSON document on
//! demand or on rotation. The log file therefore parses as well-formed
//! JSON at any moment, which makes asserting over logs trivial.
//!
//! ## Overview
//!
//! - **Severity filter**: five ordered levels, `CRITICAL` through
//!   `DEBUG`; a record is accepted when its level is at least as severe
//!   as the configured threshold.
//! - **Template mini-language**: one template string carries both the
//!   tree path and the message. The two-character directive `%1`
//!   descends into the child named by the next argument (creating it if
//!   absent) and flushes any pending text as a record at the node it
//!   leaves; everything else is printf-style text.
//! - **Rotation**: after 500 accepted records (or on request) the tree
//!   moves to a timestamped sibling of the primary file and is reset.
//!   At most five rotated files are retained; the oldest is deleted from
//!   disk to make room.
//! - **Lifecycle**: uninitialized → active → destroyed, with re-init
//!   permitted. Calls outside the active state are no-ops.
//!
//! ## Quick start
//!
//! ```ignore
//! use logtree_core::{log_error, log_info, LogLevel};
//!
//! fn main() {
//!     logtree_core::init(LogLevel::Info, "log.json");
//!     let _guard = logtree_core::ShutdownGuard::new();
//!
//!     log_info!("service starting");
//!     log_info!("%1worker %d up", "pool", 3);
//!     log_error!("%1%1handshake failed: %s", "net", "tls", "bad cert");
//! }
//! ```
//!
//! which leaves a `log.json` of the shape:
//!
//! ```json
//! {
//!   "logs": [ { "Time": "…", "LogLevel": "INFO", "Log": "service starting", … } ],
//!   "pool": { "logs": [ { "Log": "worker 3 up", … } ] },
//!   "net": { "tls": { "logs": [ { "LogLevel": "ERROR", … } ] } }
//! }
//! ```
//!
//! The key `"logs"` is reserved at every node for the record array and
//! must not be used as a path component.
//!
//! ## Threading
//!
//! Any thread may call any operation at any time. Records from one
//! thread keep their call order; records racing from several threads are
//! ordered by lock acquisition. Unflushed records are lost on a crash;
//! durability starts at the next dump or rotation.

pub mod config;
pub mod error;
pub mod level;
pub mod logger;
pub mod macros;
pub mod parser;
pub mod record;

mod rotation;
mod sink;
mod tree;

// Re-exports
pub use config::LoggerConfig;
pub use error::LogError;
pub use level::LogLevel;
pub use logger::{destroy, dump, init, log, log_at, rotate, set_threshold, ShutdownGuard};
pub use macros::__basename;
pub use parser::FormatArg;
pub use record::{CallOrigin, LogRecord};
