//! Environment variable names read by
//! [`LoggerConfig::from_env`](crate::init::LoggerConfig::from_env).
//!
//! These are purely helpers; [`FlowLogger`](crate::logger::FlowLogger)
//! itself never reads the environment.

/// Threshold name, e.g. `DEBUG` or `WARN`.
pub const FLOWLOG_LEVEL_ENV: &str = "FLOWLOG_LEVEL";

/// Path of the log file to append to.
pub const FLOWLOG_FILE_ENV: &str = "FLOWLOG_FILE";

/// `1`/`true`/`yes`/`on` selects structured JSON output.
pub const FLOWLOG_JSON_ENV: &str = "FLOWLOG_JSON";

/// chrono strftime pattern for line-mode timestamps.
pub const FLOWLOG_TIMESTAMP_FORMAT_ENV: &str = "FLOWLOG_TIMESTAMP_FORMAT";

/// Logger name.
pub const FLOWLOG_NAME_ENV: &str = "FLOWLOG_NAME";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a boolean flag; unset or unrecognised values yield `default`.
pub fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
