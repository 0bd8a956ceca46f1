//! Log record construction and JSON rendering.
//!
//! A record is immutable once built: timestamp, severity, optional call
//! site metadata and the formatted message. Records render into JSON
//! objects with a fixed key order (`Time`, `LogLevel`, `FileName`,
//! `FuncName`, `FileLine`, `Log`).

use chrono::Local;
use serde_json::{Map, Value};

use crate::level::LogLevel;

/// Upper bound on a rendered message, in bytes.
pub(crate) const MAX_MESSAGE_LEN: usize = 255;

/// Call site metadata decoded from the template's metadata header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOrigin {
    /// Source file basename
    pub file: String,
    /// Enclosing function name
    pub func: String,
    /// 1-based source line; 0 means "not recorded"
    pub line: u32,
}

/// A single log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Wall-clock instant, `YYYY-MM-DD HH:MM:SS.NNNNNNNNN` local time
    pub time: String,
    /// Record severity
    pub level: LogLevel,
    /// Call site, when the caller supplied one
    pub origin: Option<CallOrigin>,
    /// Rendered message, truncated to [`MAX_MESSAGE_LEN`] bytes
    pub message: String,
}

impl LogRecord {
    /// Build a record stamped with the current wall-clock time.
    pub fn new(level: LogLevel, message: String, origin: Option<CallOrigin>) -> Self {
        Self {
            time: Local::now().format("%Y-%m-%d %H:%M:%S%.9f").to_string(),
            level,
            origin,
            message: truncate_message(message),
        }
    }

    /// Render into a JSON object.
    ///
    /// `FileName`/`FuncName` appear only when an origin was decoded;
    /// `FileLine` additionally requires a non-zero line.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("Time".into(), Value::String(self.time.clone()));
        map.insert("LogLevel".into(), Value::String(self.level.as_str().into()));

        if let Some(origin) = &self.origin {
            map.insert("FileName".into(), Value::String(origin.file.clone()));
            map.insert("FuncName".into(), Value::String(origin.func.clone()));
            if origin.line > 0 {
                map.insert("FileLine".into(), Value::Number(origin.line.into()));
            }
        }

        map.insert("Log".into(), Value::String(self.message.clone()));
        Value::Object(map)
    }
}

/// Cap a message at [`MAX_MESSAGE_LEN`] bytes without splitting a char.
fn truncate_message(mut message: String) -> String {
    if message.len() <= MAX_MESSAGE_LEN {
        return message;
    }

    let mut end = MAX_MESSAGE_LEN;
    while end > 0 && !message.is_char_boundary(end) {
        end -= 1;
    }
    message.truncate(end);
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key_order() {
        let record = LogRecord::new(
            LogLevel::Info,
            "hello".into(),
            Some(CallOrigin {
                file: "main.rs".into(),
                func: "main".into(),
                line: 42,
            }),
        );

        let value = record.to_value();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["Time", "LogLevel", "FileName", "FuncName", "FileLine", "Log"]);
        assert_eq!(value["LogLevel"], "INFO");
        assert_eq!(value["FileLine"], 42);
        assert_eq!(value["Log"], "hello");
    }

    #[test]
    fn test_record_without_origin_omits_call_site_keys() {
        let record = LogRecord::new(LogLevel::Error, "bare".into(), None);

        let value = record.to_value();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("FileName"));
        assert!(!obj.contains_key("FuncName"));
        assert!(!obj.contains_key("FileLine"));
        assert_eq!(value["Log"], "bare");
    }

    #[test]
    fn test_zero_line_is_omitted() {
        let record = LogRecord::new(
            LogLevel::Warn,
            "w".into(),
            Some(CallOrigin {
                file: "a.rs".into(),
                func: "f".into(),
                line: 0,
            }),
        );

        let obj = record.to_value();
        let obj = obj.as_object().unwrap();
        assert!(obj.contains_key("FileName"));
        assert!(!obj.contains_key("FileLine"));
    }

    #[test]
    fn test_timestamp_shape() {
        let record = LogRecord::new(LogLevel::Info, "t".into(), None);

        // YYYY-MM-DD HH:MM:SS.NNNNNNNNN
        let (date, rest) = record.time.split_once(' ').unwrap();
        assert_eq!(date.len(), 10);
        let (_, nanos) = rest.split_once('.').unwrap();
        assert_eq!(nanos.len(), 9);
        assert!(nanos.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_long_message_truncated() {
        let record = LogRecord::new(LogLevel::Info, "x".repeat(1000), None);
        assert_eq!(record.message.len(), MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 'é' is two bytes; a cut at 255 would land mid-char
        let message: String = "é".repeat(200);
        let record = LogRecord::new(LogLevel::Info, message, None);
        assert!(record.message.len() <= MAX_MESSAGE_LEN);
        assert_eq!(record.message.len(), 254);
    }
}
