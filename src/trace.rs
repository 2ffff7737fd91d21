//! Function instrumentation.
//!
//! [`Traced`] wraps a function and emits an `ENTER` record before each
//! invocation and an `EXIT` or `ERROR` record after it, with elapsed time,
//! indentation and call path taken from the active chain.
//!
//! ```
//! use flowlog::trace::trace;
//!
//! let parse = trace("parse", |s: &str| s.parse::<i32>()).label("parse user input");
//! assert_eq!(parse.call("42").unwrap(), 42);
//! assert!(parse.call("x").is_err());
//! ```

use crate::callpath::{self, Frame};
use crate::level::Level;
use crate::logger::FlowLogger;
use crate::record::Fields;
use crate::registry::LoggerRegistry;
use crate::scope;
use futures_util::FutureExt;
use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt::{Debug, Display, Write as _};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Error classification used when the wrapper has no specific one.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Per-wrapper configuration.
///
/// **Fields**
/// - `label`: purpose text shown in the `ENTER` message.
/// - `log_params`: render the arguments with `Debug`.
/// - `log_result`: render the `Ok` value with `Debug`.
/// - `error_code`: classification for `ERROR` records, defaults to
///   [`INTERNAL_ERROR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOptions {
    pub label: Option<String>,
    pub log_params: bool,
    pub log_result: bool,
    pub error_code: Option<String>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            label: None,
            log_params: true,
            log_result: true,
            error_code: None,
        }
    }
}

/// A function instrumented with `ENTER`/`EXIT`/`ERROR` records.
///
/// The wrapped function takes one argument; use a tuple for several and
/// `()` for none. [`call`](Traced::call) and
/// [`call_async`](Traced::call_async) take functions returning a `Result`:
/// `Ok` ends the call as `EXIT`, `Err` as `ERROR`. The `call_value`
/// variants take any return value and fail only by panicking. Errors and
/// panics are passed back to the caller unchanged.
pub struct Traced<F> {
    name: String,
    func: F,
    options: TraceOptions,
    logger: Option<Arc<FlowLogger>>,
}

/// Wrap `func` under `name` with default options.
pub fn trace<F>(name: impl Into<String>, func: F) -> Traced<F> {
    Traced::new(name, func)
}

/// Wrap a function and name the wrapper after its path.
///
/// ```
/// fn double(x: i32) -> Result<i32, std::convert::Infallible> {
///     Ok(x * 2)
/// }
///
/// let traced = flowlog::traced!(double, "doubling");
/// assert_eq!(traced.name(), "double");
/// assert_eq!(traced.call(4).unwrap(), 8);
/// ```
#[macro_export]
macro_rules! traced {
    ($func:path) => {
        $crate::trace::Traced::new(stringify!($func), $func)
    };
    ($func:path, $label:expr) => {
        $crate::trace::Traced::new(stringify!($func), $func).label($label)
    };
}

impl<F> Traced<F> {
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self::with_options(name, func, TraceOptions::default())
    }

    pub fn with_options(name: impl Into<String>, func: F, options: TraceOptions) -> Self {
        Traced {
            name: name.into(),
            func,
            options,
            logger: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.options.label = Some(label.into());
        self
    }

    pub fn log_params(mut self, enabled: bool) -> Self {
        self.options.log_params = enabled;
        self
    }

    pub fn log_result(mut self, enabled: bool) -> Self {
        self.options.log_result = enabled;
        self
    }

    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.options.error_code = Some(code.into());
        self
    }

    /// Emit through `logger` instead of the global default logger.
    pub fn logger(mut self, logger: Arc<FlowLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &TraceOptions {
        &self.options
    }

    fn resolve_logger(&self) -> Option<Arc<FlowLogger>> {
        self.logger
            .clone()
            .or_else(|| LoggerRegistry::global().default_logger())
    }

    /// Invoke the wrapped synchronous function.
    ///
    /// A panic inside the function is logged as `ERROR` and then resumed
    /// with its original payload.
    pub fn call<A, T, E>(&self, args: A) -> Result<T, E>
    where
        F: Fn(A) -> Result<T, E>,
        A: Debug,
        T: Debug,
        E: Display + Debug,
    {
        let (call, output) = self.run(args);
        settle(call, output)
    }

    /// Invoke a wrapped function that returns a plain value. The call
    /// fails only by panicking.
    pub fn call_value<A, T>(&self, args: A) -> T
    where
        F: Fn(A) -> T,
        A: Debug,
        T: Debug,
    {
        let (call, value) = self.run(args);
        call.succeed(&value);
        value
    }

    /// Invoke the wrapped asynchronous function.
    ///
    /// Outside a [`scope`](crate::scope::scope) the invocation becomes the
    /// root of its own chain, seeded with the caller's context. If the
    /// returned future is dropped before completing, the call is still
    /// closed with an `ERROR` record; a panic is logged and resumed.
    pub async fn call_async<A, Fut, T, E>(&self, args: A) -> Result<T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        A: Debug,
        T: Debug,
        E: Display + Debug,
    {
        scope::within_chain(async move {
            let (call, output) = self.run_async(args).await;
            settle(call, output)
        })
        .await
    }

    /// Async counterpart of [`Traced::call_value`].
    pub async fn call_value_async<A, Fut, T>(&self, args: A) -> T
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = T>,
        A: Debug,
        T: Debug,
    {
        scope::within_chain(async move {
            let (call, value) = self.run_async(args).await;
            call.succeed(&value);
            value
        })
        .await
    }

    fn begin(&self, args: &dyn Debug) -> ActiveCall {
        ActiveCall::begin(self.resolve_logger(), &self.name, &self.options, args)
    }

    /// Open the call and run the function. Panics are logged and resumed
    /// here; the caller settles the returned call.
    fn run<A, R>(&self, args: A) -> (ActiveCall, R)
    where
        F: Fn(A) -> R,
        A: Debug,
    {
        let call = self.begin(&args);
        match panic::catch_unwind(AssertUnwindSafe(|| (self.func)(args))) {
            Ok(output) => (call, output),
            Err(payload) => {
                call.fail_with_panic(payload.as_ref());
                panic::resume_unwind(payload)
            }
        }
    }

    async fn run_async<A, Fut>(&self, args: A) -> (ActiveCall, Fut::Output)
    where
        F: Fn(A) -> Fut,
        Fut: Future,
        A: Debug,
    {
        let call = self.begin(&args);
        let fut = match panic::catch_unwind(AssertUnwindSafe(|| (self.func)(args))) {
            Ok(fut) => fut,
            Err(payload) => {
                call.fail_with_panic(payload.as_ref());
                panic::resume_unwind(payload)
            }
        };
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(output) => (call, output),
            Err(payload) => {
                call.fail_with_panic(payload.as_ref());
                panic::resume_unwind(payload)
            }
        }
    }
}

fn settle<T: Debug, E: Display + Debug>(call: ActiveCall, output: Result<T, E>) -> Result<T, E> {
    match output {
        Ok(value) => {
            call.succeed(&value);
            Ok(value)
        }
        Err(err) => {
            call.fail_with_error(&err);
            Err(err)
        }
    }
}

impl<F> Debug for Traced<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traced")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("logger", &self.logger.as_ref().map(|l| l.name().to_string()))
            .finish()
    }
}

/// One in-flight invocation. Exactly one of `succeed`/`fail_*` closes it;
/// dropping it unclosed closes it as a failure.
struct ActiveCall {
    logger: Option<Arc<FlowLogger>>,
    function: String,
    error_code: String,
    log_result: bool,
    frame: Frame,
    started: Instant,
    settled: bool,
}

impl ActiveCall {
    fn begin(
        logger: Option<Arc<FlowLogger>>,
        function: &str,
        options: &TraceOptions,
        args: &dyn Debug,
    ) -> Self {
        let started = Instant::now();
        let frame = callpath::enter(function);

        if let Some(logger) = logger.as_deref().filter(|l| l.enabled(Level::Info)) {
            let mut message = String::from("ENTER ->");
            if let Some(label) = &options.label {
                let _ = write!(message, " [{}]", label);
            }
            if options.log_params {
                let _ = write!(message, " | Params: {:?}", args);
            }
            logger.log_at(Level::Info, &message, Fields::new().function(function), &frame);
        }

        ActiveCall {
            logger,
            function: function.to_string(),
            error_code: options
                .error_code
                .clone()
                .unwrap_or_else(|| INTERNAL_ERROR.to_string()),
            log_result: options.log_result,
            frame,
            started,
            settled: false,
        }
    }

    /// Stop the clock and pop the frame. Returns elapsed milliseconds.
    fn close(&mut self) -> f64 {
        self.settled = true;
        let elapsed = self.started.elapsed().as_secs_f64() * 1000.0;
        callpath::exit(&self.frame);
        elapsed
    }

    fn succeed(mut self, value: &dyn Debug) {
        let elapsed = self.close();
        if let Some(logger) = self.logger.as_deref().filter(|l| l.enabled(Level::Info)) {
            let mut message = String::from("EXIT  <-");
            if self.log_result {
                let _ = write!(message, " | Result: {:?}", value);
            }
            let fields = Fields::new()
                .function(self.function.as_str())
                .duration_ms(elapsed);
            logger.log_at(Level::Info, &message, fields, &self.frame);
        }
    }

    fn fail_with_error<E: Display + Debug>(mut self, err: &E) {
        self.fail(
            || format!("FAILED: {}: {}", short_type_name::<E>(), err),
            || format!("{:?}", err),
        );
    }

    fn fail_with_panic(mut self, payload: &(dyn Any + Send)) {
        let text = panic_message(payload);
        self.fail(|| format!("PANIC: {}", text), || format!("panicked: {}", text));
    }

    fn fail(&mut self, message: impl FnOnce() -> String, detail: impl FnOnce() -> String) {
        let elapsed = self.close();
        if let Some(logger) = self.logger.as_deref().filter(|l| l.enabled(Level::Error)) {
            let stack_trace = format!(
                "{}\n\nstack backtrace:\n{}",
                detail(),
                Backtrace::force_capture()
            );
            let fields = Fields::new()
                .function(self.function.as_str())
                .error_code(self.error_code.as_str())
                .duration_ms(elapsed)
                .stack_trace(stack_trace);
            logger.log_at(Level::Error, &message(), fields, &self.frame);
        }
    }
}

impl Drop for ActiveCall {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if std::thread::panicking() {
            self.fail(
                || "PANIC: unwound before the traced call completed".to_string(),
                || "thread panicked while the traced call was pending".to_string(),
            );
        } else {
            self.fail(
                || "CANCELLED: traced call dropped before completion".to_string(),
                || "future dropped before completion".to_string(),
            );
        }
    }
}

/// `core::num::error::ParseIntError` -> `ParseIntError`; generic
/// arguments are kept as written.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head_end = full.find('<').unwrap_or(full.len());
    match full[..head_end].rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::LoggerConfig;
    use crate::memory_sink::MemorySink;
    use crate::scope::{scope, sync_scope};
    use crate::sink::LogSink;
    use serde_json::Value;
    use std::time::Duration;

    fn json_logger() -> (Arc<FlowLogger>, Arc<MemorySink>) {
        let memory = Arc::new(MemorySink::new());
        let logger = FlowLogger::with_sinks(
            LoggerConfig::new("trace-test").json(true),
            vec![memory.clone() as Arc<dyn LogSink>],
        );
        (Arc::new(logger), memory)
    }

    fn line_logger() -> (Arc<FlowLogger>, Arc<MemorySink>) {
        let memory = Arc::new(MemorySink::new());
        let logger =
            FlowLogger::with_sinks(LoggerConfig::new("trace-test"), vec![memory.clone() as Arc<dyn LogSink>]);
        (Arc::new(logger), memory)
    }

    #[derive(Debug, PartialEq)]
    struct Oops(&'static str);

    impl Display for Oops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "oops: {}", self.0)
        }
    }

    #[test]
    fn nested_calls_pair_in_lifo_order() {
        sync_scope(|| {
            let (logger, memory) = json_logger();
            let inner = trace("inner", |n: u32| Ok::<_, Oops>(n + 1)).logger(logger.clone());
            let outer = trace("outer", |n: u32| inner.call(n).and_then(|a| inner.call(a)))
            .logger(logger.clone());

            assert_eq!(outer.call(1), Ok(3));
            assert_eq!(callpath::depth(), 0);

            let events: Vec<(String, String)> = memory
                .json_lines()
                .iter()
                .map(|v| {
                    let kind = v["message"].as_str().unwrap().split_whitespace().next().unwrap().to_string();
                    (kind, v["function"].as_str().unwrap().to_string())
                })
                .collect();
            let expected = [
                ("ENTER", "outer"),
                ("ENTER", "inner"),
                ("EXIT", "inner"),
                ("ENTER", "inner"),
                ("EXIT", "inner"),
                ("EXIT", "outer"),
            ];
            assert_eq!(events.len(), expected.len());
            for (got, want) in events.iter().zip(expected.iter()) {
                assert_eq!((got.0.as_str(), got.1.as_str()), *want);
            }

            let lines = memory.json_lines();
            assert_eq!(lines[1]["call_stack"], "outer -> inner");
            assert_eq!(lines[2]["call_stack"], "outer -> inner");
            assert_eq!(lines[5]["call_stack"], "outer");
        });
    }

    #[test]
    fn error_is_logged_and_returned_unchanged() {
        sync_scope(|| {
            let (logger, memory) = json_logger();
            let failing = trace("failing", |_: ()| -> Result<(), Oops> {
                std::thread::sleep(Duration::from_millis(10));
                Err(Oops("went wrong"))
            })
            .logger(logger);

            assert_eq!(failing.call(()), Err(Oops("went wrong")));
            assert_eq!(callpath::depth(), 0);

            let lines = memory.json_lines();
            assert_eq!(lines.len(), 2);
            let error = &lines[1];
            assert_eq!(error["level"], "ERROR");
            assert_eq!(error["error_code"], INTERNAL_ERROR);
            assert!(error["message"].as_str().unwrap().contains("Oops: oops: went wrong"));
            assert!(error["duration_ms"].as_f64().unwrap() >= 10.0);
            assert!(error["stack_trace"].as_str().unwrap().contains("Oops(\"went wrong\")"));
            assert!(error["stack_trace"].as_str().unwrap().contains("stack backtrace"));
        });
    }

    #[test]
    fn specific_error_code_overrides_default() {
        sync_scope(|| {
            let (logger, memory) = json_logger();
            let failing = trace("db", |_: ()| Err::<(), _>(Oops("timeout")))
                .error_code("DB_TIMEOUT")
                .logger(logger);
            assert!(failing.call(()).is_err());
            assert_eq!(memory.json_lines()[1]["error_code"], "DB_TIMEOUT");
        });
    }

    #[test]
    fn panic_is_logged_and_resumed() {
        sync_scope(|| {
            let (logger, memory) = json_logger();
            let boom = trace("boom", |_: ()| -> Result<(), Oops> { panic!("kaboom") }).logger(logger);

            let caught = panic::catch_unwind(AssertUnwindSafe(|| boom.call(())));
            let payload = caught.unwrap_err();
            assert_eq!(payload.downcast_ref::<&str>(), Some(&"kaboom"));
            assert_eq!(callpath::depth(), 0);

            let lines = memory.json_lines();
            assert_eq!(lines[1]["message"], "PANIC: kaboom");
            assert_eq!(lines[1]["error_code"], INTERNAL_ERROR);
        });
    }

    #[test]
    fn line_mode_renders_label_params_and_result() {
        sync_scope(|| {
            let (logger, memory) = line_logger();
            let add = trace("add", |(a, b): (i32, i32)| Ok::<_, Oops>(a + b))
                .label("sum two numbers")
                .logger(logger);
            assert_eq!(add.call((2, 3)), Ok(5));

            let lines = memory.lines();
            assert!(
                lines[0].ends_with("| INFO    | [add] ENTER -> [sum two numbers] | Params: (2, 3) | Path: add"),
                "{}",
                lines[0]
            );
            assert!(lines[1].contains("| INFO    | [add] EXIT  <- | Result: 5 (took "), "{}", lines[1]);
            assert!(lines[1].ends_with("ms) | Path: add"));
        });
    }

    #[test]
    fn params_and_result_can_be_suppressed() {
        sync_scope(|| {
            let (logger, memory) = json_logger();
            let secret = Traced::with_options(
                "login",
                |password: &str| Ok::<_, Oops>(password.len()),
                TraceOptions {
                    log_params: false,
                    log_result: false,
                    ..TraceOptions::default()
                },
            )
            .logger(logger);
            secret.call("hunter2").unwrap();
            let lines = memory.lines();
            assert!(lines.iter().all(|l| !l.contains("hunter2") && !l.contains("Result")));
            assert_eq!(memory.json_lines()[0]["message"], "ENTER ->");
            assert_eq!(memory.json_lines()[1]["message"], "EXIT  <-");
        });
    }

    #[test]
    fn body_logs_are_indented_under_the_call() {
        sync_scope(|| {
            let (logger, memory) = line_logger();
            let inner_logger = logger.clone();
            let work = trace("work", move |_: ()| {
                inner_logger.info("inside");
                Ok::<_, Oops>(())
            })
            .logger(logger);
            work.call(()).unwrap();
            let lines = memory.lines();
            assert!(lines[0].contains("| INFO    | [work] ENTER"));
            assert!(lines[1].contains("| INFO    |   inside | Path: work"));
            assert!(lines[2].contains("| INFO    | [work] EXIT"));
        });
    }

    #[test]
    fn without_any_logger_bookkeeping_still_balances() {
        sync_scope(|| {
            let quiet = Traced::new("quiet", |x: u8| Ok::<_, Oops>(x));
            // No global logger is registered in the unit-test binary.
            if LoggerRegistry::global().default_logger().is_none() {
                assert_eq!(quiet.call(9), Ok(9));
                assert_eq!(callpath::depth(), 0);
            }
        });
    }

    #[tokio::test]
    async fn async_calls_track_depth_per_task() {
        scope(async {
            let (logger, memory) = json_logger();
            let slow = trace("slow", |ms: u64| async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok::<_, Oops>(callpath::depth())
            })
            .logger(logger);

            assert_eq!(slow.call_async(10).await, Ok(1));
            assert_eq!(callpath::depth(), 0);
            let lines: Vec<Value> = memory.json_lines();
            let exit = &lines[1];
            assert!(exit["duration_ms"].as_f64().unwrap() >= 10.0);
            assert_eq!(exit["function"], "slow");
        })
        .await;
    }

    #[tokio::test]
    async fn dropped_future_still_closes_the_call() {
        scope(async {
            let (logger, memory) = json_logger();
            let hang = trace("hang", |_: ()| async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, Oops>(())
            })
            .logger(logger);

            let res = tokio::time::timeout(Duration::from_millis(20), hang.call_async(())).await;
            assert!(res.is_err());
            assert_eq!(callpath::depth(), 0);
            let lines = memory.json_lines();
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[1]["level"], "ERROR");
            assert!(lines[1]["message"].as_str().unwrap().starts_with("CANCELLED"));
        })
        .await;
    }

    #[tokio::test]
    async fn async_error_is_logged_and_returned_unchanged() {
        scope(async {
            let (logger, memory) = json_logger();
            let failing = trace("fetch", |id: u32| async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Err::<u32, _>(Oops(if id == 7 { "missing" } else { "other" }))
            })
            .logger(logger);

            assert_eq!(failing.call_async(7).await, Err(Oops("missing")));
            assert_eq!(callpath::depth(), 0);

            let lines = memory.json_lines();
            assert_eq!(lines.len(), 2);
            let error = &lines[1];
            assert_eq!(error["level"], "ERROR");
            assert_eq!(error["function"], "fetch");
            assert_eq!(error["error_code"], INTERNAL_ERROR);
            assert!(error["duration_ms"].as_f64().unwrap() >= 10.0);
            assert!(error["message"].as_str().unwrap().contains("Oops: oops: missing"));
        })
        .await;
    }

    #[tokio::test]
    async fn async_panic_keeps_its_payload() {
        scope(async {
            let (logger, memory) = json_logger();
            let boom = trace("boom", |_: ()| async {
                tokio::task::yield_now().await;
                if true {
                    panic!("kaboom");
                }
                Ok::<(), Oops>(())
            })
            .logger(logger);

            let caught = AssertUnwindSafe(boom.call_async(())).catch_unwind().await;
            let payload = caught.unwrap_err();
            assert_eq!(payload.downcast_ref::<&str>(), Some(&"kaboom"));
            assert_eq!(callpath::depth(), 0);

            let lines = memory.json_lines();
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[1]["message"], "PANIC: kaboom");
            assert!(lines[1]["stack_trace"].as_str().unwrap().contains("panicked: kaboom"));
        })
        .await;
    }

    #[test]
    fn plain_value_functions_can_be_traced() {
        sync_scope(|| {
            let (logger, memory) = json_logger();
            let square = trace("square", |x: i64| x * x).logger(logger);
            assert_eq!(square.call_value(12), 144);

            let lines = memory.json_lines();
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[0]["message"], "ENTER -> | Params: 12");
            assert_eq!(lines[1]["message"], "EXIT  <- | Result: 144");
            assert_eq!(lines[1]["call_stack"], "square");
        });
    }

    #[test]
    fn plain_value_panic_is_logged_and_resumed() {
        sync_scope(|| {
            let (logger, memory) = json_logger();
            let index = trace("index", |i: usize| [1, 2, 3][i]).logger(logger);
            assert!(panic::catch_unwind(AssertUnwindSafe(|| index.call_value(9))).is_err());
            assert_eq!(callpath::depth(), 0);
            let lines = memory.json_lines();
            assert_eq!(lines[1]["level"], "ERROR");
            assert!(lines[1]["message"].as_str().unwrap().starts_with("PANIC: index out of bounds"));
        });
    }

    #[tokio::test]
    async fn plain_value_async_functions_can_be_traced() {
        let (logger, memory) = json_logger();
        let greet = trace("greet", |name: &'static str| async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            format!("hello {}", name)
        })
        .logger(logger);

        assert_eq!(greet.call_value_async("ada").await, "hello ada");
        assert!(!crate::scope::in_task_scope());
        assert_eq!(callpath::depth(), 0);
        let lines = memory.json_lines();
        assert_eq!(lines[1]["message"], "EXIT  <- | Result: \"hello ada\"");
        assert!(lines[1]["duration_ms"].as_f64().unwrap() >= 5.0);
    }

    #[test]
    fn short_type_names() {
        assert_eq!(short_type_name::<std::num::ParseIntError>(), "ParseIntError");
        assert_eq!(short_type_name::<Oops>(), "Oops");
    }
}
