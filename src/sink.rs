use crate::error::{FileSinkError, SinkError};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Destination for rendered log lines.
///
/// Implementations must write each line atomically with respect to other
/// callers: a [`FlowLogger`](crate::logger::FlowLogger) is shared across
/// threads and tasks, and two lines must never interleave.
pub trait LogSink: Send + Sync {
    /// Write one rendered line. The line carries no trailing newline; the
    /// sink adds its own terminator.
    ///
    /// **Returns**
    /// - `Ok(())` if the line was handed to the underlying stream.
    /// - `Err(..)` if the stream rejected it. The logger skips this sink
    ///   for the current record and keeps writing to the others.
    fn write_line(&self, line: &str) -> Result<(), SinkError>;

    /// Flush anything the underlying stream buffers.
    ///
    /// Default implementation is a no-op.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Short name used when reporting write failures.
    fn name(&self) -> &str;
}

/// Writes lines to standard error, holding the stderr lock per line.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        std::io::stderr().lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Appends lines to a file. Each line goes out in a single `write_all`
/// under the sink's mutex; no extra buffering is added.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, creating missing parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FileSinkError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| FileSinkError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| FileSinkError::Open {
                path: path.clone(),
                source,
            })?;
        Ok(FileSink {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(buf.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
