use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use crate::config::RetryConfig;
use crate::error::FetchError;
use crate::providers::{MarketDataProvider, ProviderError};

#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff_unit: Duration::from_millis(config.backoff_unit_ms),
        }
    }

    /// Wait after the rate-limited attempt at `attempt_index` (zero based).
    /// Saturates at `Duration::MAX`.
    pub fn rate_limit_delay(&self, attempt_index: u32) -> Duration {
        let units = attempt_index.saturating_add(1).saturating_mul(2);
        self.backoff_unit.checked_mul(units).unwrap_or(Duration::MAX)
    }

    pub fn transient_delay(&self) -> Duration {
        self.backoff_unit
    }
}

/// Calls the provider up to `max_attempts` times, sleeping between attempts.
///
/// The error reported after exhaustion reflects the last attempt: a final 429
/// yields `RateLimited`, anything else `UpstreamUnavailable`.
pub async fn fetch_with_retry<P>(
    provider: &P,
    url: &str,
    policy: &RetryPolicy,
) -> Result<Value, FetchError>
where
    P: MarketDataProvider + ?Sized,
{
    let attempts = policy.max_attempts.max(1);
    let mut last_error = FetchError::UpstreamUnavailable("no attempt made".to_string());

    for attempt in 0..attempts {
        let remaining = attempt + 1 < attempts;

        match provider.get_json(url).await {
            Ok(body) => return Ok(body),
            Err(ProviderError::RateLimited) => {
                last_error = FetchError::RateLimited;
                if remaining {
                    let delay = policy.rate_limit_delay(attempt);
                    warn!(
                        provider = provider.provider_name(),
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => {
                last_error = FetchError::UpstreamUnavailable(e.to_string());
                if remaining {
                    warn!(
                        provider = provider.provider_name(),
                        attempt = attempt + 1,
                        error = %e,
                        "upstream request failed, retrying"
                    );
                    tokio::time::sleep(policy.transient_delay()).await;
                }
            }
        }
    }

    Err(last_error)
}
