use crate::level::Level;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{Map, Value};

/// Optional typed fields attached to a single emission, plus free-form
/// extension fields supplied by the caller.
///
/// Built with chained setters:
///
/// ```
/// use flowlog::record::Fields;
///
/// let fields = Fields::new()
///     .function("load_orders")
///     .duration_ms(12.5)
///     .extra("custom", "field");
/// assert_eq!(fields.function.as_deref(), Some("load_orders"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fields {
    pub function: Option<String>,
    pub error_code: Option<String>,
    pub duration_ms: Option<f64>,
    pub stack_trace: Option<String>,
    /// Caller-supplied key/value pairs, in insertion order.
    pub extra: Map<String, Value>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(mut self, name: impl Into<String>) -> Self {
        self.function = Some(name.into());
        self
    }

    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    pub fn duration_ms(mut self, ms: f64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.stack_trace = Some(trace.into());
        self
    }

    /// Attach an extension field. Values that cannot be represented as JSON
    /// are stored as a descriptive string instead of being dropped.
    pub fn extra(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| Value::String(format!("<unserializable: {}>", e)));
        self.extra.insert(key.into(), value);
        self
    }
}

/// Immutable snapshot of one emission, handed to the formatter and then
/// dropped.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub logger: String,
    /// Message as composed by the logger (line mode already carries the
    /// flow prefix and suffixes).
    pub message: String,
    pub fields: Fields,
    /// `" -> "`-joined active function names, empty at top level.
    pub call_stack: String,
}
