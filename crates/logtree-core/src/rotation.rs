//! Rotation bookkeeping: the bounded registry of rotated files and the
//! rotated path naming scheme.
//!
//! The registry is a FIFO ring: when it is full, registering a new
//! rotation hands back the oldest path so the caller can delete that
//! file before the new one is written.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Timelike};

/// Default bound on retained rotated files.
pub(crate) const DEFAULT_MAX_ROTATED_FILES: usize = 5;

/// Bounded FIFO of rotated file paths, oldest first.
#[derive(Debug)]
pub(crate) struct RotationQueue {
    files: VecDeque<PathBuf>,
    capacity: usize,
}

impl RotationQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            files: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Register a freshly rotated path.
    ///
    /// Returns the evicted oldest paths (normally zero or one; more when
    /// the capacity was lowered); the caller is responsible for removing
    /// those files from disk before writing the new one.
    pub fn push(&mut self, path: PathBuf) -> Vec<PathBuf> {
        self.files.push_back(path);
        let mut evicted = Vec::new();
        while self.files.len() > self.capacity {
            if let Some(oldest) = self.files.pop_front() {
                evicted.push(oldest);
            }
        }
        evicted
    }

    /// Adjust the retention bound; excess entries drain on the next push.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

/// Compute the rotated path for `primary` at instant `now`.
///
/// The rotated file is a sibling of the primary, named
/// `<hour>_<minute>_<second>_<nanoseconds>_<primary file name>` with
/// unpadded components.
pub(crate) fn rotated_path(primary: &Path, now: DateTime<Local>) -> PathBuf {
    let stamp = format!(
        "{}_{}_{}_{}",
        now.hour(),
        now.minute(),
        now.second(),
        now.nanosecond()
    );
    let file_name = primary
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    primary.with_file_name(format!("{}_{}", stamp, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_queue_fills_before_evicting() {
        let mut queue = RotationQueue::new(3);
        assert!(queue.push("a".into()).is_empty());
        assert!(queue.push("b".into()).is_empty());
        assert!(queue.push("c".into()).is_empty());
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_full_queue_evicts_oldest_and_keeps_newest() {
        let mut queue = RotationQueue::new(2);
        queue.push("a".into());
        queue.push("b".into());

        assert_eq!(queue.push("c".into()), [PathBuf::from("a")]);
        assert_eq!(queue.push("d".into()), [PathBuf::from("b")]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_lowered_capacity_drains_on_push() {
        let mut queue = RotationQueue::new(3);
        queue.push("a".into());
        queue.push("b".into());
        queue.push("c".into());

        queue.set_capacity(1);
        let evicted = queue.push("d".into());
        assert_eq!(
            evicted,
            [PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clear_empties_queue() {
        let mut queue = RotationQueue::new(2);
        queue.push("a".into());
        queue.clear();
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_rotated_path_is_sibling_with_stamped_name() {
        let now = Local.with_ymd_and_hms(2026, 8, 2, 9, 5, 3).unwrap();
        let rotated = rotated_path(Path::new("/var/tmp/log.json"), now);
        assert_eq!(rotated, PathBuf::from("/var/tmp/9_5_3_0_log.json"));
    }

    #[test]
    fn test_rotated_path_for_bare_file_name() {
        let now = Local.with_ymd_and_hms(2026, 8, 2, 23, 59, 59).unwrap();
        let rotated = rotated_path(Path::new("log.json"), now);
        assert_eq!(rotated, PathBuf::from("23_59_59_0_log.json"));
    }
}
