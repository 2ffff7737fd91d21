use flowlog::{init_with_tracing, scope, trace, LoggerConfig};
use std::convert::Infallible;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Every `tracing` event in the process now flows through the flow
    // logger and picks up request context and call path.
    let _logger = init_with_tracing(LoggerConfig::new("bridge").level("DEBUG"));

    info!("service started");

    scope::scope(async {
        flowlog::context::set(Some("REQ-9"), Some("alice"));
        let handle = trace("handle_order", |order_id: u64| async move {
            warn!(order_id, reason = "slow upstream", "retrying order");
            Ok::<_, Infallible>(order_id)
        });
        let _ = handle.call_async(7).await;
    })
    .await;
}
