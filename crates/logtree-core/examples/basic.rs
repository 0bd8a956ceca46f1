//! Minimal end-to-end usage: a few records, a nested path, a dump.
//!
//! Run with `cargo run --example basic`, then inspect `log.json`.

use logtree_core::{log_error, log_info, log_warn, LogLevel, ShutdownGuard};

fn main() {
    logtree_core::init(LogLevel::Info, "log.json");
    let _guard = ShutdownGuard::new();

    log_info!("service starting");
    log_info!("%1listening on %s", "net", "127.0.0.1:8080");
    log_warn!("%1%1slow handshake: %d ms", "net", "tls", 350);
    log_error!("%1%1rejected: %s", "net", "tls", "expired certificate");

    // The structured form skips the template mini-language entirely
    logtree_core::log_at(LogLevel::Info, &["jobs", "reindex"], "finished");

    // The guard dumps on drop; this just makes the file appear earlier
    logtree_core::dump();
}
