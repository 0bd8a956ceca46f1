//! Snapshot writes to disk.
//!
//! Every write replaces the target file in full; the in-memory tree stays
//! the source of truth between writes, so no atomicity tricks are needed.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::LogResult;

/// Write `json` to `path`, truncating any previous content.
pub(crate) fn write_snapshot(path: &Path, json: &str) -> LogResult<()> {
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
