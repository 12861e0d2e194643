//! Periodic fulfillment stage refresh.
//!
//! A single timer-driven loop re-evaluates the stage engine for every active
//! order. The order actor applies each pass as one atomic snapshot swap, and
//! the engine is a pure function of wall-clock time, so a pass can never
//! conflict with another writer.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clients::OrderClient;
use crate::stage::now_ms;

/// Re-evaluates tracking stages on a fixed interval. The first pass runs
/// immediately on start.
pub async fn stage_refresh_loop(orders: OrderClient, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        run_refresh_pass(&orders).await;
    }
}

/// One scheduler pass against the current wall clock.
pub async fn run_refresh_pass(orders: &OrderClient) {
    match orders.refresh_stages(now_ms()).await {
        Ok(0) => debug!("Stage refresh pass found no changes"),
        Ok(advanced) => info!(advanced, "Stage refresh pass advanced orders"),
        Err(e) => warn!(error = %e, "Stage refresh pass failed"),
    }
}
