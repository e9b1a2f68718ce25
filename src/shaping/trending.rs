use serde_json::Value;

use crate::types::{MarketView, Payload, TrendingEntry, TrendingResponse};
use super::{number, rank, text, NULL};

pub const TRENDING_CAP: usize = 10;

/// Shapes a `/search/trending` payload, keeping at most ten entries.
pub fn shape_trending(payload: &Payload) -> Option<TrendingResponse> {
    let mut trending: Vec<TrendingEntry> = match payload {
        Payload::Upstream(body) => body
            .get("coins")
            .and_then(Value::as_array)
            .map(|coins| {
                coins
                    .iter()
                    .take(TRENDING_CAP)
                    .map(|coin| entry_from_upstream(coin.get("item").unwrap_or(&NULL)))
                    .collect()
            })
            .unwrap_or_default(),
        Payload::Normalized(MarketView::Trending(view)) => view.trending.clone(),
        Payload::Normalized(_) => return None,
    };

    trending.truncate(TRENDING_CAP);
    Some(TrendingResponse { trending })
}

fn entry_from_upstream(item: &Value) -> TrendingEntry {
    TrendingEntry {
        id: text(item, "id"),
        name: text(item, "name"),
        symbol: text(item, "symbol").to_uppercase(),
        thumb: text(item, "thumb"),
        market_cap_rank: rank(item, "market_cap_rank"),
        price_btc: number(item, "price_btc"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaping::fallback_data;
    use serde_json::json;

    fn trending_body(n: usize) -> Value {
        let coins: Vec<Value> = (0..n)
            .map(|i| {
                json!({"item": {
                    "id": format!("t{i}"),
                    "name": format!("Trend {i}"),
                    "symbol": format!("tr{i}"),
                    "thumb": "https://img.test/thumb.png",
                    "market_cap_rank": 100 + i,
                    "price_btc": 0.0001
                }})
            })
            .collect();
        json!({ "coins": coins })
    }

    #[test]
    fn test_upstream_mapping_and_cap() {
        let shaped = shape_trending(&Payload::Upstream(trending_body(15))).unwrap();

        assert_eq!(shaped.trending.len(), TRENDING_CAP);
        assert_eq!(shaped.trending[0].id, "t0");
        assert_eq!(shaped.trending[0].symbol, "TR0");
        assert_eq!(shaped.trending[0].market_cap_rank, 100);
        assert_eq!(shaped.trending[0].price_btc, 0.0001);
    }

    #[test]
    fn test_item_without_fields() {
        let payload = Payload::Upstream(json!({"coins": [{"score": 0}]}));

        let entry = &shape_trending(&payload).unwrap().trending[0];

        assert_eq!(entry.id, "");
        assert_eq!(entry.market_cap_rank, 0);
        assert_eq!(entry.price_btc, 0.0);
    }

    #[test]
    fn test_normalized_passes_through() {
        let view = fallback_data::trending();
        let payload = Payload::Normalized(MarketView::Trending(view.clone()));

        assert_eq!(shape_trending(&payload).unwrap(), view);
    }
}
