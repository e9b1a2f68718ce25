use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{MarketDataProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

pub struct CoinGeckoProvider {
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn provider_name(&self) -> &str {
        "coingecko"
    }

    async fn get_json(&self, url: &str) -> Result<Value, ProviderError> {
        debug!(url, "upstream request");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::InvalidResponse(e.to_string())
            }
        })
    }
}

/// URL builders for the three market endpoints.
#[derive(Clone, Debug)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn top_coins(&self, limit: u32) -> String {
        format!(
            "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=24h,7d",
            self.base_url, limit
        )
    }

    pub fn trending(&self) -> String {
        format!("{}/search/trending", self.base_url)
    }

    pub fn global(&self) -> String {
        format!("{}/global", self.base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    #[test]
    fn test_endpoint_urls() {
        let endpoints = Endpoints::new("http://localhost:9000/api/v3/");

        assert_eq!(endpoints.base_url(), "http://localhost:9000/api/v3");
        assert_eq!(
            endpoints.trending(),
            "http://localhost:9000/api/v3/search/trending"
        );
        assert_eq!(endpoints.global(), "http://localhost:9000/api/v3/global");

        let top = endpoints.top_coins(5);
        assert!(top.starts_with("http://localhost:9000/api/v3/coins/markets?"));
        assert!(top.contains("per_page=5"));
        assert!(top.contains("sparkline=true"));
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(Endpoints::default().base_url(), DEFAULT_BASE_URL);
    }

    fn provider(timeout: Duration) -> CoinGeckoProvider {
        CoinGeckoProvider::new(timeout).unwrap()
    }

    #[tokio::test]
    async fn test_sends_json_accept_header() {
        let server = MockServer::start();
        let global = server.mock(|when, then| {
            when.method(GET)
                .path("/global")
                .header("accept", "application/json");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"data": {"markets": 7}}"#);
        });

        let body = provider(Duration::from_secs(5))
            .get_json(&server.url("/global"))
            .await
            .unwrap();

        assert_eq!(body["data"]["markets"], 7);
        global.assert_hits(1);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/limited");
            then.status(429);
        });
        server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(502);
        });
        let provider = provider(Duration::from_secs(5));

        let limited = provider.get_json(&server.url("/limited")).await.unwrap_err();
        let broken = provider.get_json(&server.url("/broken")).await.unwrap_err();

        assert_eq!(limited, ProviderError::RateLimited);
        assert_eq!(broken, ProviderError::Status(502));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/global");
            then.status(200).body("not json");
        });

        let err = provider(Duration::from_secs(5))
            .get_json(&server.url("/global"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_slow_upstream_is_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/global");
            then.status(200)
                .delay(Duration::from_millis(500))
                .body(r#"{"data": {"markets": 7}}"#);
        });

        let err = provider(Duration::from_millis(100))
            .get_json(&server.url("/global"))
            .await
            .unwrap_err();

        assert_eq!(err, ProviderError::Timeout);
    }
}
