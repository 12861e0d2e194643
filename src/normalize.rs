//! Legacy order reconciliation.
//!
//! Historical deployments persisted orders in several shapes. Each observed
//! shape is an enumerable schema with an explicit field mapping; every raw
//! record is coerced through its schema's mapping into the canonical
//! [`Order`]. Normalization never fails: anything missing or malformed
//! coalesces to a safe default.

use serde_json::Value;
use tracing::info;

use crate::domain::{Order, OrderStatus, TrackingStage, DEFAULT_PAYMENT_METHOD};
use crate::store::record::Record;
use crate::store::repository::{load_collection, store_collection, Repository, RepositoryError};

pub const FALLBACK_BUYER: &str = "Unknown Customer";
pub const FALLBACK_TITLE: &str = "Unknown Item";

/// Every order shape ever observed in persisted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacySchema {
    /// The current canonical shape.
    Canonical,
    /// Early storefront checkout records, keyed by `user`/`product`/`payment`.
    Storefront,
    /// Rows exported by the first admin console, keyed by `customer`/`name`/`amount`.
    AdminExport,
    /// Anything unrecognizable; every field takes its default.
    Unknown,
}

/// Where each canonical field lives in one schema.
struct FieldMap {
    id: &'static str,
    buyer_name: &'static str,
    buyer_email: &'static str,
    title: &'static str,
    price: &'static str,
    address: &'static str,
    payment_method: &'static str,
    created_at: &'static str,
    status: &'static str,
    tracking_stage: &'static str,
}

const CANONICAL_MAP: FieldMap = FieldMap {
    id: "id",
    buyer_name: "buyerName",
    buyer_email: "buyerEmail",
    title: "title",
    price: "price",
    address: "address",
    payment_method: "paymentMethod",
    created_at: "creationTimestamp",
    status: "status",
    tracking_stage: "trackingStage",
};

const STOREFRONT_MAP: FieldMap = FieldMap {
    id: "id",
    buyer_name: "user",
    buyer_email: "email",
    title: "product",
    price: "price",
    address: "address",
    payment_method: "payment",
    created_at: "createdAt",
    status: "status",
    tracking_stage: "trackingStage",
};

const ADMIN_EXPORT_MAP: FieldMap = FieldMap {
    id: "id",
    buyer_name: "customer",
    buyer_email: "email",
    title: "name",
    price: "amount",
    address: "address",
    payment_method: "payment",
    created_at: "createdAt",
    status: "status",
    tracking_stage: "trackingStage",
};

pub fn detect_schema(raw: &Value) -> LegacySchema {
    let Some(obj) = raw.as_object() else {
        return LegacySchema::Unknown;
    };
    if obj.contains_key("buyerName") || obj.contains_key("buyerEmail") || obj.contains_key("trackingStage") {
        LegacySchema::Canonical
    } else if obj.contains_key("user") || obj.contains_key("product") || obj.contains_key("payment") {
        LegacySchema::Storefront
    } else if obj.contains_key("customer") || obj.contains_key("name") {
        LegacySchema::AdminExport
    } else {
        LegacySchema::Unknown
    }
}

fn field_map(schema: LegacySchema) -> &'static FieldMap {
    match schema {
        LegacySchema::Canonical | LegacySchema::Unknown => &CANONICAL_MAP,
        LegacySchema::Storefront => &STOREFRONT_MAP,
        LegacySchema::AdminExport => &ADMIN_EXPORT_MAP,
    }
}

/// Reconciles any raw order record into a canonical [`Order`].
///
/// `now_ms` stamps records with no usable creation instant; `next_id` mints
/// ids for records that lack one. Idempotent: feeding the canonical
/// serialization of the output back in reproduces it exactly.
pub fn normalize(raw: &Value, now_ms: u64, next_id: &mut dyn FnMut() -> String) -> Order {
    let map = field_map(detect_schema(raw));

    Order {
        id: id_field(raw, map.id).unwrap_or_else(|| next_id()),
        buyer_name: string_field(raw, map.buyer_name)
            .unwrap_or_else(|| FALLBACK_BUYER.to_string()),
        buyer_email: string_field(raw, map.buyer_email).unwrap_or_default(),
        title: string_field(raw, map.title).unwrap_or_else(|| FALLBACK_TITLE.to_string()),
        price: price_field(raw, map.price),
        address: string_field(raw, map.address).unwrap_or_default(),
        payment_method: string_field(raw, map.payment_method)
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        created_at_ms: timestamp_field(raw, map.created_at).unwrap_or(now_ms),
        status: status_field(raw, map.status),
        tracking_stage: stage_field(raw, map.tracking_stage),
    }
}

/// One-time repair pass from the legacy collection into the canonical one.
///
/// Runs only when the canonical collection is empty and the legacy one is
/// not; a non-empty canonical collection means migration already happened
/// and newer data must not be overwritten by stale legacy records. The
/// legacy collection itself is left untouched.
pub fn migrate_legacy(
    repo: &dyn Repository,
    now_ms: u64,
    next_id: &mut dyn FnMut() -> String,
) -> Result<usize, RepositoryError> {
    let canonical: Vec<Order> = load_collection(repo, Order::COLLECTION);
    if !canonical.is_empty() {
        return Ok(0);
    }
    let mut migrated = Vec::new();
    for &alias in Order::ALIASES {
        let legacy: Vec<Value> = load_collection(repo, alias);
        migrated.extend(legacy.iter().map(|raw| normalize(raw, now_ms, next_id)));
    }
    if migrated.is_empty() {
        return Ok(0);
    }
    store_collection(repo, Order::COLLECTION, &migrated)?;
    info!(count = migrated.len(), "Migrated legacy orders into canonical collection");
    Ok(migrated.len())
}

fn string_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Ids have been observed as strings and as bare numbers.
fn id_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Prices may be numbers or numeric strings; anything else, and anything
/// negative or non-finite, is 0.
fn price_field(raw: &Value, key: &str) -> f64 {
    let parsed = match raw.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(price) if price.is_finite() && price >= 0.0 => price,
        _ => 0.0,
    }
}

fn timestamp_field(raw: &Value, key: &str) -> Option<u64> {
    match raw.get(key) {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn status_field(raw: &Value, key: &str) -> OrderStatus {
    match raw.get(key).and_then(Value::as_str) {
        Some(s) if s.eq_ignore_ascii_case("cancelled") || s.eq_ignore_ascii_case("canceled") => {
            OrderStatus::Cancelled
        }
        _ => OrderStatus::Confirmed,
    }
}

/// Stage names have been stored both as identifiers ("OutForDelivery") and
/// as display strings ("Out For Delivery").
fn stage_field(raw: &Value, key: &str) -> TrackingStage {
    let Some(s) = raw.get(key).and_then(Value::as_str) else {
        return TrackingStage::OrderConfirmed;
    };
    let folded: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    match folded.to_ascii_lowercase().as_str() {
        "processing" => TrackingStage::Processing,
        "shipped" => TrackingStage::Shipped,
        "outfordelivery" => TrackingStage::OutForDelivery,
        "delivered" => TrackingStage::Delivered,
        _ => TrackingStage::OrderConfirmed,
    }
}
