//! Concurrency tests: records survive thread races intact.
//!
//! Same serialization discipline as the scenario suite: the logger is
//! process-wide, so each test takes the shared mutex before touching it.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tempfile::TempDir;

use logtree_core::{log_critical, LogLevel, LoggerConfig};

static TEST_LOCK: Mutex<()> = Mutex::new(());

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn rotated_files(dir: &Path, primary_name: &str) -> Vec<PathBuf> {
    let suffix = format!("_{}", primary_name);
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            name != primary_name && name.ends_with(&suffix)
        })
        .collect()
}

/// Collect every message under `node` in one parsed tree.
fn messages_under(json: &Value, node: &str) -> Vec<String> {
    match json[node]["logs"].as_array() {
        Some(logs) => logs
            .iter()
            .map(|record| record["Log"].as_str().unwrap().to_string())
            .collect(),
        None => Vec::new(),
    }
}

/// Two racing critical records both land in the root array.
#[test]
fn test_two_threads_log_to_root() {
    let _serial = TEST_LOCK.lock();
    let temp = TempDir::new().unwrap();
    let primary = temp.path().join("log.json");

    logtree_core::init(LogLevel::Info, &primary);

    let threads: Vec<_> = (0..2)
        .map(|_| {
            thread::spawn(|| {
                log_critical!("foo");
            })
        })
        .collect();
    for handle in threads {
        handle.join().unwrap();
    }

    logtree_core::dump();

    let json = read_json(&primary);
    let logs = json["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    for record in logs {
        assert_eq!(record["Log"], "foo");
        assert_eq!(record["LogLevel"], "CRITICAL");
    }

    logtree_core::destroy();
}

/// K threads × T records: nothing lost, nothing duplicated, and each
/// thread's records keep their call order.
#[test]
fn test_record_conservation_across_threads() {
    let _serial = TEST_LOCK.lock();
    let temp = TempDir::new().unwrap();
    let primary = temp.path().join("log.json");

    const THREADS: usize = 8;
    const PER_THREAD: usize = 50;

    logtree_core::init(LogLevel::Info, &primary);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            thread::spawn(move || {
                let node = format!("thread{}", t);
                for i in 0..PER_THREAD {
                    logtree_core::log_at(LogLevel::Info, &[node.as_str()], format!("m{}", i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    logtree_core::dump();

    let json = read_json(&primary);
    let mut total = 0;
    for t in 0..THREADS {
        let node = format!("thread{}", t);
        let messages = messages_under(&json, &node);
        assert_eq!(messages.len(), PER_THREAD);
        for (i, message) in messages.iter().enumerate() {
            assert_eq!(message, &format!("m{}", i), "per-thread order is call order");
        }
        total += messages.len();
    }
    assert_eq!(total, THREADS * PER_THREAD);

    logtree_core::destroy();
}

/// A logger thread racing a rotator thread: every record ends up in
/// exactly one file, live or rotated.
#[test]
fn test_log_and_rotate_race_preserves_records() {
    let _serial = TEST_LOCK.lock();
    let temp = TempDir::new().unwrap();
    let primary = temp.path().join("log.json");

    const RECORDS: usize = 200;
    const ROTATIONS: usize = 20;

    // Retention high enough that no rotated file is evicted mid-test
    LoggerConfig::new(LogLevel::Info, &primary)
        .max_rotated_files(64)
        .install();

    let writer = thread::spawn(|| {
        for i in 0..RECORDS {
            logtree_core::log_at(LogLevel::Info, &["stream"], format!("r{}", i));
        }
    });
    let rotator = thread::spawn(|| {
        for _ in 0..ROTATIONS {
            logtree_core::rotate();
            thread::sleep(Duration::from_millis(1));
        }
    });

    writer.join().unwrap();
    rotator.join().unwrap();

    logtree_core::dump();

    let mut seen: HashSet<String> = HashSet::new();
    let mut total = 0;

    let mut files = rotated_files(temp.path(), "log.json");
    files.push(primary.clone());
    for path in files {
        for message in messages_under(&read_json(&path), "stream") {
            assert!(seen.insert(message), "record appeared in two files");
            total += 1;
        }
    }
    assert_eq!(total, RECORDS);

    logtree_core::destroy();
}

/// Dump, rotate and log hammering from three threads stays coherent and
/// leaves a parseable primary file.
#[test]
fn test_mixed_operations_smoke() {
    let _serial = TEST_LOCK.lock();
    let temp = TempDir::new().unwrap();
    let primary = temp.path().join("log.json");

    logtree_core::init(LogLevel::Debug, &primary);

    let writer = thread::spawn(|| {
        for i in 0..100 {
            logtree_core::log_at(LogLevel::Debug, &["a", "b"], format!("w{}", i));
        }
    });
    let dumper = thread::spawn(|| {
        for _ in 0..25 {
            logtree_core::dump();
        }
    });
    let rotator = thread::spawn(|| {
        for _ in 0..5 {
            logtree_core::rotate();
            thread::sleep(Duration::from_millis(2));
        }
    });

    writer.join().unwrap();
    dumper.join().unwrap();
    rotator.join().unwrap();

    logtree_core::dump();
    let json = read_json(&primary);
    assert!(json.is_object());

    logtree_core::destroy();
}
