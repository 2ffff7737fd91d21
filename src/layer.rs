use crate::level::Level;
use crate::logger::FlowLogger;
use crate::record::Fields;
use serde_json::Value;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that forwards `tracing` events into a
/// [`FlowLogger`].
///
/// Events pick up the request context and call path of the chain that
/// emitted them, exactly like direct logger calls. Fields named
/// `function`, `error_code`, `duration_ms` and `stack_trace` fill the typed
/// record fields; everything else becomes an extension field.
pub struct FlowLayer {
    logger: Arc<FlowLogger>,
    /// Total events seen by the layer (before filtering by level).
    pub total_events: Arc<AtomicU64>,
    /// Events that passed the logger's threshold.
    pub forwarded_events: Arc<AtomicU64>,
}

impl FlowLayer {
    pub fn new(logger: Arc<FlowLogger>) -> Self {
        Self {
            logger,
            total_events: Arc::new(AtomicU64::new(0)),
            forwarded_events: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<S> Layer<S> for FlowLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.total_events.fetch_add(1, Ordering::Relaxed);
        let level = Level::from(event.metadata().level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut fields = Fields::new();
        let mut message: Option<String> = None;
        let mut visitor = FieldVisitor {
            fields: &mut fields,
            message: &mut message,
        };
        event.record(&mut visitor);

        let message = message.unwrap_or_else(|| event.metadata().target().to_string());
        self.forwarded_events.fetch_add(1, Ordering::Relaxed);
        self.logger.log(level, message, fields);
    }
}

use tracing::field::{Field, Visit};

pub struct FieldVisitor<'a> {
    pub fields: &'a mut Fields,
    pub message: &'a mut Option<String>,
}

impl<'a> FieldVisitor<'a> {
    fn put_string(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => *self.message = Some(value),
            "function" => self.fields.function = Some(value),
            "error_code" => self.fields.error_code = Some(value),
            "stack_trace" => self.fields.stack_trace = Some(value),
            name => {
                self.fields.extra.insert(name.to_string(), Value::String(value));
            }
        }
    }

    fn put_number(&mut self, field: &Field, value: Value, as_f64: Option<f64>) {
        match (field.name(), as_f64) {
            ("duration_ms", Some(ms)) => self.fields.duration_ms = Some(ms),
            (name, _) => {
                self.fields.extra.insert(name.to_string(), value);
            }
        }
    }
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.put_string(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put_number(field, Value::from(value), Some(value as f64));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put_number(field, Value::from(value), Some(value as f64));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put_number(field, Value::from(value), Some(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.extra.insert(field.name().to_string(), Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put_string(field, format!("{:?}", value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::LoggerConfig;
    use crate::memory_sink::MemorySink;
    use crate::sink::LogSink;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[test]
    fn events_become_structured_records() {
        let memory = Arc::new(MemorySink::new());
        let logger = Arc::new(FlowLogger::with_sinks(
            LoggerConfig::new("bridge").json(true).level("INFO"),
            vec![memory.clone() as Arc<dyn LogSink>],
        ));
        let layer = FlowLayer::new(logger);
        let total = Arc::clone(&layer.total_events);
        let forwarded = Arc::clone(&layer.forwarded_events);
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("dropped by threshold");
            tracing::warn!(order_id = 123, duration_ms = 4.5, function = "submit", "order slow");
        });

        assert_eq!(total.load(Ordering::Relaxed), 2);
        assert_eq!(forwarded.load(Ordering::Relaxed), 1);
        let lines = memory.json_lines();
        assert_eq!(lines.len(), 1);
        let record = &lines[0];
        assert_eq!(record["level"], "WARNING");
        assert_eq!(record["message"], "order slow");
        assert_eq!(record["function"], "submit");
        assert_eq!(record["duration_ms"].as_f64(), Some(4.5));
        assert_eq!(record["order_id"].as_i64(), Some(123));
    }
}
