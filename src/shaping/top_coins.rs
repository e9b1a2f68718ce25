use serde_json::Value;

use crate::types::{CoinSummary, MarketView, Payload, TopCoinsResponse};
use super::{number, rank, text};

/// Shapes a `/coins/markets` payload, keeping at most `limit` coins.
///
/// Returns `None` when the payload is a normalized view of another kind.
pub fn shape_top_coins(payload: &Payload, limit: usize) -> Option<TopCoinsResponse> {
    let mut coins: Vec<CoinSummary> = match payload {
        Payload::Upstream(body) => body
            .as_array()
            .map(|entries| entries.iter().take(limit).map(coin_from_upstream).collect())
            .unwrap_or_default(),
        Payload::Normalized(MarketView::TopCoins(view)) => view.coins.clone(),
        Payload::Normalized(_) => return None,
    };

    coins.truncate(limit);
    Some(TopCoinsResponse { coins })
}

fn coin_from_upstream(entry: &Value) -> CoinSummary {
    CoinSummary {
        id: text(entry, "id"),
        name: text(entry, "name"),
        symbol: text(entry, "symbol").to_uppercase(),
        image: text(entry, "image"),
        current_price: number(entry, "current_price"),
        market_cap: number(entry, "market_cap"),
        market_cap_rank: rank(entry, "market_cap_rank"),
        price_change_percentage_24h: number(entry, "price_change_percentage_24h"),
        price_change_percentage_7d: number(entry, "price_change_percentage_7d_in_currency"),
        total_volume: number(entry, "total_volume"),
        sparkline_in_7d: entry
            .pointer("/sparkline_in_7d/price")
            .and_then(Value::as_array)
            .map(|prices| prices.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default(),
    }
}
