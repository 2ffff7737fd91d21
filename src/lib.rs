pub mod error;
pub mod level;
pub mod record;
pub mod format;

pub mod scope;
pub mod context;
pub mod callpath;

pub mod sink;
pub mod noop_sink;
pub mod memory_sink;

pub mod logger;
pub mod registry;
pub mod trace;
pub mod layer;

pub mod env;
pub mod init;

pub use crate::context::Context;
pub use crate::init::{init, init_with_tracing, LoggerConfig};
pub use crate::level::Level;
pub use crate::logger::FlowLogger;
pub use crate::record::Fields;
pub use crate::trace::{trace, TraceOptions, Traced};
