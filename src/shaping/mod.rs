// src/shaping/mod.rs
//
// Turns whatever the fetch layer returned into the public response shape.
// Upstream bodies are mapped field by field with missing values defaulted;
// normalized payloads pass through untouched apart from truncation.

pub mod top_coins;
pub mod trending;
pub mod global;
pub mod fallback_data;

pub use top_coins::shape_top_coins;
pub use trending::{shape_trending, TRENDING_CAP};
pub use global::shape_global_stats;

use serde_json::Value;

use crate::types::MarketKind;

/// Whether a 2xx upstream body carries anything worth caching.
pub fn has_data(kind: MarketKind, body: &Value) -> bool {
    match kind {
        MarketKind::TopCoins => body.as_array().is_some_and(|coins| !coins.is_empty()),
        MarketKind::Trending => body
            .get("coins")
            .and_then(Value::as_array)
            .is_some_and(|coins| !coins.is_empty()),
        MarketKind::Global => body
            .get("data")
            .and_then(Value::as_object)
            .is_some_and(|data| !data.is_empty()),
    }
}

pub(crate) static NULL: Value = Value::Null;

pub(crate) fn text(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn number(value: &Value, field: &str) -> f64 {
    value.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

pub(crate) fn count(value: &Value, field: &str) -> u64 {
    value
        .get(field)
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
        .unwrap_or(0)
}

pub(crate) fn rank(value: &Value, field: &str) -> u32 {
    u32::try_from(count(value, field)).unwrap_or(u32::MAX)
}
