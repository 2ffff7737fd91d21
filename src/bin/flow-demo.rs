//! Execution-flow logging demo.
//!
//! Runs a small nest of traced functions so the ENTER/EXIT layout, call
//! paths and durations can be inspected on the console or in a file.

use clap::Parser;
use flowlog::format::DEFAULT_TIMESTAMP_FORMAT;
use flowlog::registry::LoggerRegistry;
use flowlog::{init, trace, FlowLogger, LoggerConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "flow-demo")]
#[command(about = "Execution-flow logging demo", long_about = None)]
struct Cli {
    /// Minimum level to emit
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARN", "ERROR"], ignore_case = true)]
    log_level: String,

    /// Append log lines to this file as well as the console
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// chrono strftime pattern for line timestamps
    #[arg(long, default_value = DEFAULT_TIMESTAMP_FORMAT)]
    timestamp_format: String,
}

fn default_logger() -> Option<Arc<FlowLogger>> {
    LoggerRegistry::global().default_logger()
}

fn function_b(_: ()) -> u32 {
    if let Some(log) = default_logger() {
        log.info("Executing logic in Function B...");
    }
    42
}

fn function_a(_: ()) {
    let log = default_logger();
    if let Some(log) = &log {
        log.info("Function A calling Function B...");
    }
    let result = flowlog::traced!(function_b).call_value(());
    if let Some(log) = &log {
        log.info(format!("Received result: {}", result));
    }
}

fn main() {
    let cli = Cli::parse();

    let mut config = LoggerConfig::default()
        .level(cli.log_level)
        .timestamp_format(cli.timestamp_format);
    if let Some(path) = cli.output_file {
        config = config.log_file(path);
    }
    let log = init(config);

    log.info("CLI Demo Started.");

    let nested_log = Arc::clone(&log);
    let demo_nested = trace("demo_nested", move |_: ()| {
        nested_log.info("Starting nested demo...");
        flowlog::traced!(function_a).call_value(());
        nested_log.info("Nested demo complete.");
    });
    demo_nested.call_value(());

    log.info("CLI Demo Finished.");
    log.flush();
}
