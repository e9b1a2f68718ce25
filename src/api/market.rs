use std::sync::Arc;

use crate::cache::Clock;
use crate::config::{GatewayConfig, TtlConfig};
use crate::error::{FetchError, GatewayError};
use crate::fetch::{CachedFetcher, FetchRequest, RetryPolicy};
use crate::providers::{Endpoints, MarketDataProvider};
use crate::shaping::{fallback_data, shape_global_stats, shape_top_coins, shape_trending};
use crate::types::{GlobalStats, MarketKind, MarketView, TopCoinsResponse, TrendingResponse};

/// Upper bound on `limit`, the provider's largest page.
pub const MAX_TOP_COINS_LIMIT: u32 = 250;

/// The three market reads exposed to the HTTP layer.
pub struct MarketService<P> {
    fetcher: CachedFetcher<P>,
    endpoints: Endpoints,
    ttl: TtlConfig,
}

impl<P: MarketDataProvider> MarketService<P> {
    pub fn new(fetcher: CachedFetcher<P>, endpoints: Endpoints, ttl: TtlConfig) -> Self {
        Self { fetcher, endpoints, ttl }
    }

    pub fn from_config(provider: P, config: &GatewayConfig) -> Self {
        let fetcher = CachedFetcher::new(provider, RetryPolicy::from_config(&config.retry));
        Self::new(fetcher, Endpoints::new(&config.upstream.base_url), config.ttl.clone())
    }

    pub fn with_clock(provider: P, config: &GatewayConfig, clock: Arc<dyn Clock>) -> Self {
        let fetcher =
            CachedFetcher::with_clock(provider, RetryPolicy::from_config(&config.retry), clock);
        Self::new(fetcher, Endpoints::new(&config.upstream.base_url), config.ttl.clone())
    }

    pub fn fetcher(&self) -> &CachedFetcher<P> {
        &self.fetcher
    }

    pub async fn get_top_coins(&self, limit: u32) -> Result<TopCoinsResponse, GatewayError> {
        let limit = limit.clamp(1, MAX_TOP_COINS_LIMIT);
        let request = FetchRequest {
            key: format!("top_coins_{}", limit),
            url: self.endpoints.top_coins(limit),
            ttl: self.ttl.top_coins(),
            kind: MarketKind::TopCoins,
            fallback: Some(MarketView::TopCoins(fallback_data::top_coins())),
        };
        let key = request.key.clone();

        let payload = self.fetcher.cached_fetch(request).await?;
        shape_top_coins(&payload, limit as usize).ok_or_else(|| mismatch(key))
    }

    pub async fn get_trending(&self) -> Result<TrendingResponse, GatewayError> {
        let request = FetchRequest {
            key: MarketKind::Trending.label().to_string(),
            url: self.endpoints.trending(),
            ttl: self.ttl.trending(),
            kind: MarketKind::Trending,
            fallback: Some(MarketView::Trending(fallback_data::trending())),
        };
        let key = request.key.clone();

        let payload = self.fetcher.cached_fetch(request).await?;
        shape_trending(&payload).ok_or_else(|| mismatch(key))
    }

    pub async fn get_global_stats(&self) -> Result<GlobalStats, GatewayError> {
        let request = FetchRequest {
            key: MarketKind::Global.label().to_string(),
            url: self.endpoints.global(),
            ttl: self.ttl.global(),
            kind: MarketKind::Global,
            fallback: Some(MarketView::Global(fallback_data::global_stats())),
        };
        let key = request.key.clone();

        let payload = self.fetcher.cached_fetch(request).await?;
        shape_global_stats(&payload).ok_or_else(|| mismatch(key))
    }
}

// A normalized payload of the wrong kind under this key; nothing servable.
fn mismatch(key: String) -> GatewayError {
    GatewayError::NoDataAvailable {
        key,
        source: FetchError::EmptyPayload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::providers::{MockProvider, ProviderError};
    use chrono::Duration as ChronoDuration;
    use serde_json::{json, Value};

    fn test_config() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.upstream.base_url = "http://upstream.test/api/v3".to_string();
        config.retry.backoff_unit_ms = 1;
        config
    }

    fn service(provider: MockProvider) -> (MarketService<MockProvider>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let service = MarketService::with_clock(provider, &test_config(), clock.clone());
        (service, clock)
    }

    fn markets(n: usize) -> Value {
        let coins: Vec<Value> = (0..n)
            .map(|i| {
                json!({
                    "id": format!("coin-{i}"),
                    "symbol": format!("sym{i}"),
                    "name": format!("Coin {i}"),
                    "current_price": 10.0,
                    "market_cap_rank": i + 1,
                    "sparkline_in_7d": {"price": [1.0, 2.0]}
                })
            })
            .collect();
        Value::Array(coins)
    }

    #[tokio::test]
    async fn test_top_five_from_healthy_upstream() {
        let provider = MockProvider::new("test").always(Ok(markets(20)));
        let (service, _clock) = service(provider);

        let response = service.get_top_coins(5).await.unwrap();

        assert_eq!(response.coins.len(), 5);
        assert!(response.coins.iter().all(|c| c.symbol.starts_with("SYM")));
        let calls = service.fetcher().provider().calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("per_page=5"));
    }

    #[tokio::test]
    async fn test_second_request_within_ttl_is_served_from_cache() {
        let provider = MockProvider::new("test").always(Ok(markets(20)));
        let (service, clock) = service(provider);

        let first = service.get_top_coins(20).await.unwrap();
        clock.advance(ChronoDuration::seconds(1));
        let second = service.get_top_coins(20).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.fetcher().provider().call_count(), 1);
    }

    #[tokio::test]
    async fn test_limit_is_clamped() {
        let provider = MockProvider::new("test").always(Ok(markets(3)));
        let (service, _clock) = service(provider);

        service.get_top_coins(0).await.unwrap();
        service.get_top_coins(10_000).await.unwrap();

        let calls = service.fetcher().provider().calls();
        assert!(calls[0].contains("per_page=1&"));
        assert!(calls[1].contains("per_page=250&"));
        assert!(service.fetcher().cache().get_stale("top_coins_1").await.is_some());
        assert!(service.fetcher().cache().get_stale("top_coins_250").await.is_some());
    }

    #[tokio::test]
    async fn test_empty_global_data_yields_static_fallback() {
        let provider = MockProvider::new("test").always(Ok(json!({"data": {}})));
        let (service, _clock) = service(provider);

        let stats = service.get_global_stats().await.unwrap();

        assert_eq!(stats, fallback_data::global_stats());
    }

    #[tokio::test]
    async fn test_trending_falls_back_when_rate_limited() {
        let provider = MockProvider::new("test").always(Err(ProviderError::RateLimited));
        let (service, _clock) = service(provider);

        let trending = service.get_trending().await.unwrap();

        assert_eq!(trending, fallback_data::trending());
        assert_eq!(service.fetcher().provider().call_count(), 3);
    }

    #[tokio::test]
    async fn test_stale_real_data_preferred_after_expiry() {
        let provider = MockProvider::new("test")
            .with_json(markets(20))
            .always(Err(ProviderError::Status(503)));
        let (service, clock) = service(provider);

        let fresh = service.get_top_coins(5).await.unwrap();
        clock.advance(ChronoDuration::minutes(30));
        let replayed = service.get_top_coins(5).await.unwrap();

        assert_eq!(fresh, replayed);
        assert_eq!(replayed.coins[0].id, "coin-0");
    }

    #[tokio::test]
    async fn test_fallback_shorter_than_limit() {
        let provider = MockProvider::new("test").always(Err(ProviderError::Timeout));
        let (service, _clock) = service(provider);

        let response = service.get_top_coins(50).await.unwrap();

        assert_eq!(response, fallback_data::top_coins());
    }
}
