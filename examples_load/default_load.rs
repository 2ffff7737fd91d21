use flowlog::noop_sink::NoopSink;
use flowlog::sink::LogSink;
use flowlog::{trace, FlowLogger, LoggerConfig};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

fn main() {
    // ERROR threshold keeps the console quiet; traced calls still pay for
    // call-path bookkeeping.
    let logger = Arc::new(FlowLogger::with_sinks(
        LoggerConfig::new("load").level("ERROR"),
        vec![Arc::new(NoopSink) as Arc<dyn LogSink>],
    ));
    let step = trace("step", |i: u64| Ok::<_, Infallible>(i * 2)).logger(Arc::clone(&logger));

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        let _ = step.call(i);
    }

    let elapsed = start.elapsed();
    println!("filtered: traced {} calls in {:?} (~{:.0} calls/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
