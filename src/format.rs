use crate::context::Context;
use crate::record::LogRecord;
use chrono::format::{Item, StrftimeItems};
use serde_json::{Map, Value};

/// Default line-mode timestamp pattern, microsecond precision.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// ISO-8601 timestamp used by the structured formatter.
pub const STRUCTURED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Returns `true` if chrono can render `pattern` without error.
pub fn is_valid_timestamp_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Rendering strategy selected once per logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatter {
    /// `"<timestamp> | <LEVEL> | <message>"`.
    Line { timestamp_format: String },
    /// One JSON object per line.
    Structured,
}

impl Formatter {
    pub fn line(timestamp_format: impl Into<String>) -> Self {
        Formatter::Line {
            timestamp_format: timestamp_format.into(),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Formatter::Structured)
    }

    /// Render `record` observed under `context` into a single line without
    /// a trailing newline.
    pub fn render(&self, record: &LogRecord, context: &Context) -> String {
        match self {
            Formatter::Line { timestamp_format } => format!(
                "{} | {:<7} | {}",
                record.timestamp.format(timestamp_format),
                record.level.as_str(),
                record.message
            ),
            Formatter::Structured => render_structured(record, context),
        }
    }
}

fn render_structured(record: &LogRecord, context: &Context) -> String {
    let mut obj = Map::new();
    obj.insert(
        "timestamp".into(),
        Value::String(record.timestamp.format(STRUCTURED_TIMESTAMP_FORMAT).to_string()),
    );
    obj.insert("level".into(), Value::String(record.level.as_str().into()));
    obj.insert("logger".into(), Value::String(record.logger.clone()));
    obj.insert("message".into(), Value::String(record.message.clone()));
    obj.insert("request_id".into(), opt_string(&context.request_id));
    obj.insert("user_id".into(), opt_string(&context.user_id));

    let fields = &record.fields;
    if let Some(function) = &fields.function {
        obj.insert("function".into(), Value::String(function.clone()));
    }
    if let Some(code) = &fields.error_code {
        obj.insert("error_code".into(), Value::String(code.clone()));
    }
    if let Some(ms) = fields.duration_ms {
        // Non-finite durations have no JSON number form.
        obj.insert("duration_ms".into(), Value::from(ms));
    }
    if let Some(trace) = &fields.stack_trace {
        obj.insert("stack_trace".into(), Value::String(trace.clone()));
    }
    if !record.call_stack.is_empty() {
        obj.insert("call_stack".into(), Value::String(record.call_stack.clone()));
    }
    for (key, value) in &fields.extra {
        obj.insert(key.clone(), value.clone());
    }

    Value::Object(obj).to_string()
}

fn opt_string(value: &Option<String>) -> Value {
    match value {
        Some(v) => Value::String(v.clone()),
        None => Value::Null,
    }
}
