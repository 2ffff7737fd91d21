use std::path::PathBuf;

/// Error returned when a level name is not one of the known severities.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level name: {0:?}")]
pub struct LevelParseError(pub String);

/// Error returned by a [`LogSink`](crate::sink::LogSink) that could not
/// accept a rendered line.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("i/o error writing log line: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink is closed")]
    Closed,
}

/// Error raised while attaching a file sink. Never escapes logger
/// construction; it is reported as a warning record instead.
#[derive(thiserror::Error, Debug)]
pub enum FileSinkError {
    #[error("could not create log directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
