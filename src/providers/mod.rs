// src/providers/mod.rs

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single upstream request.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProviderError {
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// One GET against `url`, decoded as JSON. No retries.
    async fn get_json(&self, url: &str) -> Result<Value, ProviderError>;
}

// Module declarations
pub mod mocks;
pub mod coingecko;

// Re-export for testing
pub use mocks::MockProvider;
pub use coingecko::{CoinGeckoProvider, Endpoints};
