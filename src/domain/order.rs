use serde::{Deserialize, Serialize};

use crate::stage::stage_at;

/// Payment method recorded when the buyer does not pick one at checkout.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash on Delivery";

/// Whether an order is still progressing through fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Confirmed,
    Cancelled,
}

/// Fulfillment milestones, in the order they are reached.
///
/// Variant order is stage order: `Ord` on this enum is the progression
/// relation the store relies on to never move a stage backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrackingStage {
    OrderConfirmed,
    Processing,
    Shipped,
    OutForDelivery,
    Delivered,
}

impl std::fmt::Display for TrackingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrackingStage::OrderConfirmed => "OrderConfirmed",
            TrackingStage::Processing => "Processing",
            TrackingStage::Shipped => "Shipped",
            TrackingStage::OutForDelivery => "OutForDelivery",
            TrackingStage::Delivered => "Delivered",
        };
        write!(f, "{}", name)
    }
}

/// A placed customization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub buyer_name: String,
    pub buyer_email: String,
    /// Purchased product or service, e.g. "Full Vinyl Wrap".
    pub title: String,
    pub price: f64,
    pub address: String,
    pub payment_method: String,
    #[serde(rename = "creationTimestamp")]
    pub created_at_ms: u64,
    pub status: OrderStatus,
    pub tracking_stage: TrackingStage,
}

/// Payload submitted at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub buyer_name: String,
    pub buyer_email: String,
    pub title: String,
    pub price: f64,
    pub address: String,
    pub payment_method: Option<String>,
}

/// Custom actions for Order entities.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Stops fulfillment and freezes the tracking stage at its current value.
    Cancel,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// The order was cancelled; carries the stage it was frozen at.
    Cancelled(TrackingStage),
    /// The order was already cancelled or already delivered; nothing changed.
    Unchanged,
}

impl Order {
    /// Cancels the order. Idempotent: a second cancel, or a cancel of an
    /// already-delivered order, reports `Unchanged`.
    pub fn cancel(&mut self) -> OrderActionResult {
        if self.status == OrderStatus::Cancelled || self.tracking_stage == TrackingStage::Delivered {
            return OrderActionResult::Unchanged;
        }
        self.status = OrderStatus::Cancelled;
        OrderActionResult::Cancelled(self.tracking_stage)
    }

    /// Re-evaluates the tracking stage against the wall clock.
    ///
    /// Only confirmed, undelivered orders move, and only forwards. Returns
    /// whether the stage changed.
    pub fn refresh_stage(&mut self, now_ms: u64) -> bool {
        if self.status != OrderStatus::Confirmed || self.tracking_stage == TrackingStage::Delivered {
            return false;
        }
        let computed = stage_at(self.created_at_ms, now_ms);
        if computed > self.tracking_stage {
            self.tracking_stage = computed;
            true
        } else {
            false
        }
    }
}
