//! The in-memory log tree.
//!
//! An insertion-ordered JSON object tree. Interior nodes are objects keyed
//! by caller-supplied names; any node may also carry a reserved `"logs"`
//! sibling holding its record array. The tree is plain data; all locking
//! happens in the owner.

use serde_json::{Map, Value};

use crate::error::LogResult;
use crate::record::LogRecord;

/// Reserved sibling key holding a node's record array.
pub(crate) const LOGS_KEY: &str = "logs";

/// Whether a caller-supplied path segment may name a child node.
///
/// Empty names and the reserved `"logs"` key would make the serialized
/// tree ambiguous, so they are rejected before any mutation.
pub(crate) fn segment_is_valid(name: &str) -> bool {
    !name.is_empty() && name != LOGS_KEY
}

/// Insertion-ordered tree of named object nodes with per-node record arrays.
#[derive(Debug, Default)]
pub struct LogTree {
    root: Map<String, Value>,
}

impl LogTree {
    /// Create an empty tree (just the anonymous root object).
    pub fn new() -> Self {
        Self { root: Map::new() }
    }

    /// True when no child nodes or records exist.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Create every node along `path` that does not exist yet.
    ///
    /// Descending through a directive creates the child even when no
    /// record lands there. Returns false without touching the tree when
    /// any segment is invalid.
    pub fn ensure_path(&mut self, path: &[String]) -> bool {
        if !path.iter().all(|segment| segment_is_valid(segment)) {
            return false;
        }

        let mut node = &mut self.root;
        for segment in path {
            let child = node
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match child.as_object_mut() {
                Some(object) => object,
                None => return false,
            };
        }
        true
    }

    /// Append `record` to the node at `path`, creating missing nodes.
    ///
    /// Children are attached in first-creation order; records in append
    /// order. Returns false without touching the tree when any segment
    /// is invalid.
    pub fn append_record(&mut self, path: &[String], record: LogRecord) -> bool {
        if !path.iter().all(|segment| segment_is_valid(segment)) {
            return false;
        }

        let mut node = &mut self.root;
        for segment in path {
            let child = node
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match child.as_object_mut() {
                Some(object) => object,
                None => return false,
            };
        }

        let logs = node
            .entry(LOGS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));
        match logs.as_array_mut() {
            Some(records) => {
                records.push(record.to_value());
                true
            }
            None => false,
        }
    }

    /// Render the whole tree as pretty-printed JSON.
    ///
    /// An empty tree renders as `{}`.
    pub fn to_pretty_json(&self) -> LogResult<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Drop every child node and record; the root object remains.
    pub fn clear(&mut self) {
        self.root.clear();
    }
}
