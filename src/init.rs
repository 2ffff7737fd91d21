use crate::env::{
    env_bool, env_or, FLOWLOG_FILE_ENV, FLOWLOG_JSON_ENV, FLOWLOG_LEVEL_ENV, FLOWLOG_NAME_ENV,
    FLOWLOG_TIMESTAMP_FORMAT_ENV,
};
use crate::format::DEFAULT_TIMESTAMP_FORMAT;
use crate::layer::FlowLayer;
use crate::logger::FlowLogger;
use crate::registry::LoggerRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Default logger name.
pub const DEFAULT_LOGGER_NAME: &str = "HFT-Logger";

/// Construction parameters for a [`FlowLogger`].
///
/// **Fields**
/// - `name`: logger name written into every structured record.
/// - `level`: threshold name (`DEBUG`, `INFO`, `WARN`/`WARNING`, `ERROR`);
///   anything else falls back to `INFO`.
/// - `log_file`: optional path of an append-mode file sink.
/// - `json`: structured output instead of text lines.
/// - `timestamp_format`: chrono strftime pattern for line mode.
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    pub name: String,
    pub level: String,
    pub log_file: Option<PathBuf>,
    pub json: bool,
    pub timestamp_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            level: "INFO".to_string(),
            log_file: None,
            json: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn timestamp_format(mut self, pattern: impl Into<String>) -> Self {
        self.timestamp_format = pattern.into();
        self
    }

    /// Build a config from `FLOWLOG_*` environment variables, using the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env_or(FLOWLOG_NAME_ENV, &defaults.name),
            level: env_or(FLOWLOG_LEVEL_ENV, &defaults.level),
            log_file: std::env::var_os(FLOWLOG_FILE_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            json: env_bool(FLOWLOG_JSON_ENV, defaults.json),
            timestamp_format: env_or(FLOWLOG_TIMESTAMP_FORMAT_ENV, &defaults.timestamp_format),
        }
    }
}

/// Build a logger from `config` and register it in the global registry.
///
/// **Returns**
/// - The registered logger. If it is the first logger registered in the
///   process it also becomes the default used by
///   [`Traced`](crate::trace::Traced) call sites without an explicit
///   logger.
pub fn init(config: LoggerConfig) -> Arc<FlowLogger> {
    LoggerRegistry::global().register(FlowLogger::new(config))
}

/// Initialize from environment variables. Equivalent to
/// `init(LoggerConfig::from_env())`.
pub fn init_from_env() -> Arc<FlowLogger> {
    init(LoggerConfig::from_env())
}

/// Like [`init`], and additionally install a `tracing` subscriber that
/// forwards every `tracing` event into the new logger.
///
/// **Effects**
///
/// If another global subscriber is already installed the bridge is not
/// installed; the logger itself is still registered and returned.
pub fn init_with_tracing(config: LoggerConfig) -> Arc<FlowLogger> {
    let logger = init(config);
    let subscriber = Registry::default().with(FlowLayer::new(Arc::clone(&logger)));
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        logger.warn("A global tracing subscriber is already set; tracing events are not bridged");
    }
    logger
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = LoggerConfig::default();
        assert_eq!(config.name, DEFAULT_LOGGER_NAME);
        assert_eq!(config.level, "INFO");
        assert!(config.log_file.is_none());
        assert!(!config.json);
        assert_eq!(config.timestamp_format, "%Y-%m-%d %H:%M:%S%.6f");
    }

    #[test]
    fn builder_setters_chain() {
        let config = LoggerConfig::new("svc")
            .level("debug")
            .json(true)
            .log_file("/tmp/x.log")
            .timestamp_format("%H:%M");
        assert_eq!(config.name, "svc");
        assert_eq!(config.level, "debug");
        assert!(config.json);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert_eq!(config.timestamp_format, "%H:%M");
    }
}
