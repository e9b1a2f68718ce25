use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::debug;

use crate::cache::{Clock, TtlCache};
use crate::error::{FetchError, GatewayError};
use crate::providers::MarketDataProvider;
use crate::shaping::has_data;
use crate::types::Payload;

use super::fallback::resolve_fallback;
use super::retry::{fetch_with_retry, RetryPolicy};
use super::FetchRequest;

type Outcome = Result<Value, FetchError>;
type FlightMap = Mutex<HashMap<String, watch::Receiver<Option<Outcome>>>>;

/// TTL cache in front of the provider, with retry and fallback on failure.
pub struct CachedFetcher<P> {
    provider: P,
    cache: TtlCache<Payload>,
    policy: RetryPolicy,
    in_flight: FlightMap,
}

enum Role<'a> {
    Leader(Flight<'a>),
    Follower(watch::Receiver<Option<Outcome>>),
}

/// The running upstream fetch for one key. Dropping it unregisters the key,
/// so a cancelled leader never strands its followers.
struct Flight<'a> {
    in_flight: &'a FlightMap,
    key: String,
    sender: watch::Sender<Option<Outcome>>,
}

impl Flight<'_> {
    fn publish(&self, outcome: Outcome) {
        self.sender.send_replace(Some(outcome));
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

impl<P: MarketDataProvider> CachedFetcher<P> {
    pub fn new(provider: P, policy: RetryPolicy) -> Self {
        Self::with_cache(provider, policy, TtlCache::new())
    }

    pub fn with_clock(provider: P, policy: RetryPolicy, clock: Arc<dyn Clock>) -> Self {
        Self::with_cache(provider, policy, TtlCache::with_clock(clock))
    }

    fn with_cache(provider: P, policy: RetryPolicy, cache: TtlCache<Payload>) -> Self {
        Self {
            provider,
            cache,
            policy,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &TtlCache<Payload> {
        &self.cache
    }

    /// Serves a fresh cache hit without touching the network; otherwise
    /// fetches, stores and returns, or falls back when the fetch fails.
    ///
    /// Concurrent misses on the same key share one upstream fetch: the first
    /// caller runs the retry loop and the rest receive its outcome.
    pub async fn cached_fetch(&self, request: FetchRequest) -> Result<Payload, GatewayError> {
        loop {
            if let Some(hit) = self.cache.get_if_fresh(&request.key, request.ttl).await {
                debug!(key = %request.key, "cache hit");
                return Ok(hit);
            }

            match self.join_flight(&request.key) {
                Role::Leader(flight) => {
                    // A previous flight may have filled the entry since the check above.
                    if let Some(hit) = self.cache.get_if_fresh(&request.key, request.ttl).await {
                        return Ok(hit);
                    }

                    let outcome = self.fetch_usable(&request).await;
                    if let Ok(body) = &outcome {
                        self.cache
                            .put(request.key.clone(), Payload::Upstream(body.clone()))
                            .await;
                        debug!(key = %request.key, "cache refreshed");
                    }
                    flight.publish(outcome.clone());
                    drop(flight);

                    return self.settle(&request, outcome).await;
                }
                Role::Follower(mut receiver) => {
                    let shared = match receiver.wait_for(Option::is_some).await {
                        Ok(outcome) => (*outcome).clone(),
                        Err(_) => None,
                    };
                    match shared {
                        Some(outcome) => {
                            debug!(key = %request.key, "joined in-flight fetch");
                            return self.settle(&request, outcome).await;
                        }
                        // Leader went away without an outcome; start over.
                        None => continue,
                    }
                }
            }
        }
    }

    async fn fetch_usable(&self, request: &FetchRequest) -> Outcome {
        let body = fetch_with_retry(&self.provider, &request.url, &self.policy).await?;
        if !has_data(request.kind, &body) {
            return Err(FetchError::EmptyPayload);
        }
        Ok(body)
    }

    async fn settle(&self, request: &FetchRequest, outcome: Outcome) -> Result<Payload, GatewayError> {
        match outcome {
            Ok(body) => Ok(Payload::Upstream(body)),
            Err(cause) => resolve_fallback(&self.cache, request, cause).await,
        }
    }

    fn join_flight(&self, key: &str) -> Role<'_> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(receiver) = in_flight.get(key) {
            return Role::Follower(receiver.clone());
        }

        let (sender, receiver) = watch::channel(None);
        in_flight.insert(key.to_string(), receiver);
        Role::Leader(Flight {
            in_flight: &self.in_flight,
            key: key.to_string(),
            sender,
        })
    }
}
