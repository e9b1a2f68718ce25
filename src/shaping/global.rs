use serde_json::Value;

use crate::types::{GlobalStats, MarketView, Payload};
use super::{count, number, NULL};

/// Shapes a `/global` payload into aggregate market stats.
pub fn shape_global_stats(payload: &Payload) -> Option<GlobalStats> {
    match payload {
        Payload::Upstream(body) => {
            let data = body.get("data").unwrap_or(&NULL);
            Some(GlobalStats {
                total_market_cap: usd(data, "total_market_cap"),
                total_volume: usd(data, "total_volume"),
                market_cap_change_24h: number(data, "market_cap_change_percentage_24h_usd"),
                active_cryptocurrencies: count(data, "active_cryptocurrencies"),
                markets: count(data, "markets"),
                btc_dominance: data
                    .pointer("/market_cap_percentage/btc")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            })
        }
        Payload::Normalized(MarketView::Global(stats)) => Some(stats.clone()),
        Payload::Normalized(_) => None,
    }
}

fn usd(data: &Value, field: &str) -> f64 {
    data.get(field)
        .map(|per_currency| number(per_currency, "usd"))
        .unwrap_or(0.0)
}
