use std::sync::Arc;

use flowlog::error::SinkError;
use flowlog::sink::LogSink;
use flowlog::{trace, FlowLogger, LoggerConfig};

/// Example of plugging in a custom destination by implementing the
/// `LogSink` trait directly. Imagine this hands lines to some in-house
/// collector agent; for the sake of example we just print them with a
/// prefix.
struct PrefixedStdoutSink;

impl LogSink for PrefixedStdoutSink {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        println!("[my-agent] {}", line);
        Ok(())
    }

    fn name(&self) -> &str {
        "my-agent"
    }
}

fn main() {
    let sink: Arc<dyn LogSink> = Arc::new(PrefixedStdoutSink);
    let logger = Arc::new(FlowLogger::with_sinks(
        LoggerConfig::new("custom-sink").json(true),
        vec![sink],
    ));

    logger.set_context(Some("REQ-123"), Some("USER-456"));
    logger.info("custom sink example started");

    let divide = trace("divide", |(a, b): (i32, i32)| {
        a.checked_div(b).ok_or("division by zero")
    })
    .logger(Arc::clone(&logger));

    let _ = divide.call((10, 2));
    let _ = divide.call((1, 0));
}
