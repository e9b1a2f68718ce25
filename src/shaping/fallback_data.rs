//! Fixed snapshots served when the upstream is down and nothing is cached.

use crate::types::{CoinSummary, GlobalStats, TopCoinsResponse, TrendingEntry, TrendingResponse};

const COIN_IMAGE_BASE: &str = "https://assets.coingecko.com/coins/images";

#[allow(clippy::too_many_arguments)]
fn coin(
    id: &str,
    name: &str,
    symbol: &str,
    image: &str,
    price: f64,
    market_cap: f64,
    rank: u32,
    change_24h: f64,
    volume: f64,
) -> CoinSummary {
    CoinSummary {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        image: format!("{COIN_IMAGE_BASE}/{image}"),
        current_price: price,
        market_cap,
        market_cap_rank: rank,
        price_change_percentage_24h: change_24h,
        price_change_percentage_7d: 0.0,
        total_volume: volume,
        sparkline_in_7d: Vec::new(),
    }
}

pub fn top_coins() -> TopCoinsResponse {
    TopCoinsResponse {
        coins: vec![
            coin("bitcoin", "Bitcoin", "BTC", "1/large/bitcoin.png", 97250.0, 1.93e12, 1, 1.2, 3.8e10),
            coin("ethereum", "Ethereum", "ETH", "279/large/ethereum.png", 3420.0, 4.12e11, 2, 0.8, 1.9e10),
            coin("tether", "Tether", "USDT", "325/large/Tether.png", 1.0, 1.38e11, 3, 0.01, 6.1e10),
            coin("ripple", "XRP", "XRP", "44/large/xrp-symbol-white-128.png", 2.31, 1.32e11, 4, -0.6, 4.2e9),
            coin("binancecoin", "BNB", "BNB", "825/large/bnb-icon2_2x.png", 695.0, 1.0e11, 5, 0.4, 1.6e9),
            coin("solana", "Solana", "SOL", "4128/large/solana.png", 205.0, 9.9e10, 6, 2.1, 3.9e9),
            coin("usd-coin", "USDC", "USDC", "6319/large/usdc.png", 1.0, 4.4e10, 7, 0.0, 7.3e9),
            coin("dogecoin", "Dogecoin", "DOGE", "5/large/dogecoin.png", 0.33, 4.9e10, 8, -1.4, 2.6e9),
            coin("cardano", "Cardano", "ADA", "975/large/cardano.png", 0.98, 3.4e10, 9, -0.9, 1.1e9),
            coin("tron", "TRON", "TRX", "1094/large/tron-logo.png", 0.25, 2.2e10, 10, 0.3, 8.0e8),
        ],
    }
}

fn trend(id: &str, name: &str, symbol: &str, thumb: &str, rank: u32, price_btc: f64) -> TrendingEntry {
    TrendingEntry {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        thumb: format!("{COIN_IMAGE_BASE}/{thumb}"),
        market_cap_rank: rank,
        price_btc,
    }
}

pub fn trending() -> TrendingResponse {
    TrendingResponse {
        trending: vec![
            trend("solana", "Solana", "SOL", "4128/thumb/solana.png", 6, 0.00211),
            trend("sui", "Sui", "SUI", "26375/thumb/sui-ocean-square.png", 18, 0.0000465),
            trend("pepe", "Pepe", "PEPE", "29850/thumb/pepe-token.jpeg", 24, 0.000000000196),
            trend("chainlink", "Chainlink", "LINK", "877/thumb/chainlink-new-logo.png", 13, 0.000241),
            trend("avalanche-2", "Avalanche", "AVAX", "12559/thumb/Avalanche_Circle_RedWhite_Trans.png", 14, 0.000396),
            trend("near", "NEAR Protocol", "NEAR", "10365/thumb/near.jpg", 27, 0.0000535),
            trend("render-token", "Render", "RENDER", "11636/thumb/rndr.png", 35, 0.0000728),
        ],
    }
}

pub fn global_stats() -> GlobalStats {
    GlobalStats {
        total_market_cap: 3.42e12,
        total_volume: 1.18e11,
        market_cap_change_24h: 0.85,
        active_cryptocurrencies: 16_500,
        markets: 1_220,
        btc_dominance: 56.4,
    }
}
