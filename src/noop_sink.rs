use crate::error::SinkError;
use crate::sink::LogSink;

/// A sink that simply drops all lines.
///
/// Useful for measuring the overhead of formatting and call-path
/// bookkeeping without any I/O.
#[derive(Debug, Clone, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn write_line(&self, _line: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}
