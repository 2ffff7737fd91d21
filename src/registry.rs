use crate::logger::FlowLogger;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Named loggers plus the default one used by trace call sites that were
/// not given a logger.
///
/// The default is set exactly once, by the first registration. Tests build
/// their own registry instead of touching [`LoggerRegistry::global`].
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<FlowLogger>>>,
    default: OnceLock<Arc<FlowLogger>>,
}

static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry.
    pub fn global() -> &'static LoggerRegistry {
        GLOBAL.get_or_init(LoggerRegistry::new)
    }

    /// Register `logger` under its name, replacing any logger with the same
    /// name. The first logger ever registered becomes the default.
    pub fn register(&self, logger: FlowLogger) -> Arc<FlowLogger> {
        self.register_arc(Arc::new(logger))
    }

    pub fn register_arc(&self, logger: Arc<FlowLogger>) -> Arc<FlowLogger> {
        let _ = self.default.set(Arc::clone(&logger));
        self.loggers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(logger.name().to_string(), Arc::clone(&logger));
        logger
    }

    pub fn get(&self, name: &str) -> Option<Arc<FlowLogger>> {
        self.loggers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    pub fn default_logger(&self) -> Option<Arc<FlowLogger>> {
        self.default.get().cloned()
    }

    pub fn len(&self) -> usize {
        self.loggers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::LoggerConfig;

    #[test]
    fn first_registration_wins_default() {
        let registry = LoggerRegistry::new();
        assert!(registry.default_logger().is_none());
        registry.register(FlowLogger::new(LoggerConfig::new("first")));
        registry.register(FlowLogger::new(LoggerConfig::new("second")));
        assert_eq!(registry.default_logger().unwrap().name(), "first");
        assert_eq!(registry.get("second").unwrap().name(), "second");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn same_name_replaces_entry_but_not_default() {
        let registry = LoggerRegistry::new();
        let first = registry.register(FlowLogger::new(LoggerConfig::new("svc")));
        let second = registry.register(FlowLogger::new(LoggerConfig::new("svc").level("ERROR")));
        assert!(Arc::ptr_eq(&registry.default_logger().unwrap(), &first));
        assert!(Arc::ptr_eq(&registry.get("svc").unwrap(), &second));
        assert_eq!(registry.len(), 1);
    }
}
