//! Fulfillment stage timing.
//!
//! The tracking stage of a confirmed order is a pure function of its creation
//! instant and the current wall clock: each stage is reached once the elapsed
//! time passes a fixed cumulative threshold. Cancelled orders keep whatever
//! stage they were frozen at.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::{Order, OrderStatus, TrackingStage};

pub const HOUR_MS: u64 = 60 * 60 * 1000;

/// Cumulative stage schedule. A stage is in effect once `elapsed >= threshold`;
/// Delivered is terminal, nothing follows it.
pub const STAGE_SCHEDULE: [(TrackingStage, u64); 5] = [
    (TrackingStage::OrderConfirmed, 0),
    (TrackingStage::Processing, 24 * HOUR_MS),
    (TrackingStage::Shipped, 72 * HOUR_MS),
    (TrackingStage::OutForDelivery, 96 * HOUR_MS),
    (TrackingStage::Delivered, 120 * HOUR_MS),
];

/// Current wall clock as epoch milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Stage reached by an order created at `created_at_ms`, as of `now_ms`.
///
/// Scans the schedule in ascending order and keeps the last threshold that
/// elapsed time has passed. A clock that reads earlier than the creation
/// instant clamps elapsed time to zero; behavior across a backward clock
/// adjustment mid-session is otherwise undefined and handled by the caller
/// never writing a stage regression back.
pub fn stage_at(created_at_ms: u64, now_ms: u64) -> TrackingStage {
    let elapsed = now_ms.saturating_sub(created_at_ms);
    let mut current = TrackingStage::OrderConfirmed;
    for (stage, threshold) in STAGE_SCHEDULE {
        if elapsed >= threshold {
            current = stage;
        }
    }
    current
}

/// Stage of a full order record: cancelled orders report their frozen stage
/// without recomputation.
pub fn order_stage(order: &Order, now_ms: u64) -> TrackingStage {
    match order.status {
        OrderStatus::Cancelled => order.tracking_stage,
        OrderStatus::Confirmed => stage_at(order.created_at_ms, now_ms),
    }
}
