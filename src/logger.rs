use crate::callpath;
use crate::context;
use crate::format::{is_valid_timestamp_format, Formatter, DEFAULT_TIMESTAMP_FORMAT};
use crate::init::LoggerConfig;
use crate::level::Level;
use crate::record::{Fields, LogRecord};
use crate::sink::{ConsoleSink, FileSink, LogSink};
use chrono::Local;
use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Named logger bound to a level threshold, a [`Formatter`] and a set of
/// sinks.
///
/// Every logger reads call-path and context state from the active logical
/// chain, so two loggers used in the same request report the same request
/// id and nesting.
pub struct FlowLogger {
    name: String,
    level: Level,
    formatter: Formatter,
    sinks: Vec<Arc<dyn LogSink>>,
    /// Records that passed the level filter.
    written_records: AtomicU64,
    /// Individual sink writes that failed.
    failed_writes: AtomicU64,
}

impl FlowLogger {
    /// Build a logger with a console sink and, if configured, a file sink.
    ///
    /// Never fails: an unknown level falls back to `INFO`, a malformed
    /// timestamp pattern falls back to [`DEFAULT_TIMESTAMP_FORMAT`], and a
    /// log file that cannot be opened leaves the logger console-only. Each
    /// of these is reported as a `WARNING` record once the logger is up.
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_sinks(config, Vec::new())
    }

    /// Like [`FlowLogger::new`], attaching `extra` sinks after the console
    /// and file sinks.
    pub fn with_sinks(config: LoggerConfig, extra: Vec<Arc<dyn LogSink>>) -> Self {
        let mut warnings = Vec::new();

        let level = match config.level.parse::<Level>() {
            Ok(level) => level,
            Err(e) => {
                warnings.push(format!("{}, falling back to INFO", e));
                Level::Info
            }
        };

        let formatter = if config.json {
            Formatter::Structured
        } else if is_valid_timestamp_format(&config.timestamp_format) {
            Formatter::line(config.timestamp_format.clone())
        } else {
            warnings.push(format!(
                "Invalid timestamp format {:?}, using {:?}",
                config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT
            ));
            Formatter::line(DEFAULT_TIMESTAMP_FORMAT)
        };

        let mut sinks: Vec<Arc<dyn LogSink>> = vec![Arc::new(ConsoleSink)];
        if let Some(path) = &config.log_file {
            match FileSink::open(path) {
                Ok(sink) => sinks.push(Arc::new(sink)),
                Err(e) => warnings.push(format!(
                    "Could not open log file '{}': {}",
                    path.display(),
                    e
                )),
            }
        }
        sinks.extend(extra);

        let logger = FlowLogger {
            name: config.name,
            level,
            formatter,
            sinks,
            written_records: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
        };
        for warning in warnings {
            logger.warn(warning);
        }
        logger
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective threshold after fallback.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn is_structured(&self) -> bool {
        self.formatter.is_structured()
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn written_records(&self) -> u64 {
        self.written_records.load(Ordering::Relaxed)
    }

    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Set request/user identity on the active chain. See
    /// [`context::set`].
    pub fn set_context(&self, request_id: Option<&str>, user_id: Option<&str>) {
        context::set(request_id, user_id);
    }

    /// Emit one record at `level`. Below the threshold this returns before
    /// touching any chain state.
    pub fn log(&self, level: Level, message: impl AsRef<str>, fields: Fields) {
        if !self.enabled(level) {
            return;
        }
        let (depth, call_stack) = callpath::snapshot();
        self.emit(level, message.as_ref(), fields, depth, call_stack);
    }

    /// Emit with an explicit position in the call path. The trace wrapper
    /// uses this so that ENTER and EXIT of one call share indentation and
    /// path.
    pub(crate) fn log_at(
        &self,
        level: Level,
        message: &str,
        fields: Fields,
        frame: &callpath::Frame,
    ) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, message, fields, frame.depth, frame.path.clone());
    }

    fn emit(&self, level: Level, message: &str, fields: Fields, depth: usize, call_stack: String) {
        let message = if self.formatter.is_structured() {
            message.to_string()
        } else {
            compose_flow_message(message, &fields, depth, &call_stack)
        };
        let record = LogRecord {
            timestamp: Local::now(),
            level,
            logger: self.name.clone(),
            message,
            fields,
            call_stack,
        };
        let line = self.formatter.render(&record, &context::current());
        self.write(&line);
    }

    fn write(&self, line: &str) {
        self.written_records.fetch_add(1, Ordering::Relaxed);
        for sink in &self.sinks {
            if let Err(e) = sink.write_line(line) {
                self.failed_writes.fetch_add(1, Ordering::Relaxed);
                let _ = writeln!(
                    std::io::stderr(),
                    "log sink '{}' of logger '{}' failed: {}",
                    sink.name(),
                    self.name,
                    e
                );
            }
        }
    }

    /// Flush every sink, reporting failures on stderr.
    pub fn flush(&self) {
        for sink in &self.sinks {
            if let Err(e) = sink.flush() {
                let _ = writeln!(std::io::stderr(), "log sink '{}' flush failed: {}", sink.name(), e);
            }
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::Debug, message, Fields::default());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message, Fields::default());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::Warning, message, Fields::default());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::Error, message, Fields::default());
    }

    pub fn debug_with(&self, message: impl AsRef<str>, fields: Fields) {
        self.log(Level::Debug, message, fields);
    }

    pub fn info_with(&self, message: impl AsRef<str>, fields: Fields) {
        self.log(Level::Info, message, fields);
    }

    pub fn warn_with(&self, message: impl AsRef<str>, fields: Fields) {
        self.log(Level::Warning, message, fields);
    }

    pub fn error_with(&self, message: impl AsRef<str>, fields: Fields) {
        self.log(Level::Error, message, fields);
    }
}

impl Drop for FlowLogger {
    fn drop(&mut self) {
        self.flush();
    }
}

impl std::fmt::Debug for FlowLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowLogger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("formatter", &self.formatter)
            .field("sinks", &self.sinks.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish()
    }
}

/// `<indent><[function] ><(ERR: code) ><message>< (took N.NNms)>< | Path: ..>`
fn compose_flow_message(message: &str, fields: &Fields, depth: usize, call_stack: &str) -> String {
    let mut out = "  ".repeat(depth);
    if let Some(function) = &fields.function {
        let _ = write!(out, "[{}] ", function);
    }
    if let Some(code) = &fields.error_code {
        let _ = write!(out, "(ERR: {}) ", code);
    }
    out.push_str(message);
    if let Some(ms) = fields.duration_ms {
        let _ = write!(out, " (took {:.2}ms)", ms);
    }
    if !call_stack.is_empty() {
        let _ = write!(out, " | Path: {}", call_stack);
    }
    out
}
