use flowlog::noop_sink::NoopSink;
use flowlog::sink::LogSink;
use flowlog::{context, scope, trace, FlowLogger, LoggerConfig};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Structured output over concurrent chains. Every record also reaches
    // the console sink; run with `2>/dev/null` to measure rendering alone.
    let logger = Arc::new(FlowLogger::with_sinks(
        LoggerConfig::new("load").level("INFO").json(true),
        vec![Arc::new(NoopSink) as Arc<dyn LogSink>],
    ));
    let tasks: u64 = 8;
    let per_task: u64 = 10_000;
    let start = Instant::now();

    let handles: Vec<_> = (0..tasks)
        .map(|t| {
            let logger = Arc::clone(&logger);
            scope::spawn(async move {
                context::set(Some(format!("REQ-{}", t).as_str()), None);
                let step = trace("step", |i: u64| async move { Ok::<_, Infallible>(i) })
                    .log_result(false)
                    .logger(logger);
                for i in 0..per_task {
                    let _ = step.call_async(i).await;
                }
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.await;
    }

    let elapsed = start.elapsed();
    let n = tasks * per_task;
    println!("structured: traced {} calls over {} tasks in {:?} (~{:.0} calls/s)",
        n,
        tasks,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
