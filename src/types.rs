// src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_rank: u32,
    pub price_change_percentage_24h: f64,
    pub price_change_percentage_7d: f64,
    pub total_volume: f64,
    pub sparkline_in_7d: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopCoinsResponse {
    pub coins: Vec<CoinSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub thumb: String,
    pub market_cap_rank: u32,
    pub price_btc: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub trending: Vec<TrendingEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_market_cap: f64,
    pub total_volume: f64,
    pub market_cap_change_24h: f64,
    pub active_cryptocurrencies: u64,
    pub markets: u64,
    pub btc_dominance: f64,
}

/// The three upstream data kinds served by the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketKind {
    TopCoins,
    Trending,
    Global,
}

impl MarketKind {
    pub fn label(&self) -> &'static str {
        match self {
            MarketKind::TopCoins => "top_coins",
            MarketKind::Trending => "trending",
            MarketKind::Global => "global",
        }
    }
}

/// A response already in its public shape.
#[derive(Clone, Debug, PartialEq)]
pub enum MarketView {
    TopCoins(TopCoinsResponse),
    Trending(TrendingResponse),
    Global(GlobalStats),
}

/// What the fetch layer hands to the shapers.
///
/// The tag records where the value came from, so shaping never has to guess
/// the structure from which keys happen to be present.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Body exactly as decoded from the provider.
    Upstream(serde_json::Value),
    /// Static or previously shaped data in the public shape.
    Normalized(MarketView),
}
