// src/fetch/mod.rs

use std::time::Duration;

use crate::types::{MarketKind, MarketView};

pub mod retry;
pub mod fallback;
pub mod cached_fetch;

pub use retry::{fetch_with_retry, RetryPolicy};
pub use fallback::resolve_fallback;
pub use cached_fetch::CachedFetcher;

/// One cache-backed read, built per call.
#[derive(Clone, Debug)]
pub struct FetchRequest {
    pub key: String,
    pub url: String,
    pub ttl: Duration,
    pub kind: MarketKind,
    pub fallback: Option<MarketView>,
}
