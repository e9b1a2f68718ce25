// src/lib.rs

pub mod types;
pub mod error;
pub mod config;
pub mod providers;
pub mod cache;
pub mod fetch;
pub mod shaping;
pub mod store;
pub mod api;
pub mod server;

// Re-export commonly used types
pub use types::*;
pub use error::{FetchError, GatewayError};
pub use config::GatewayConfig;
pub use providers::{MarketDataProvider, ProviderError};
pub use cache::TtlCache;
pub use fetch::{CachedFetcher, FetchRequest, RetryPolicy};
pub use api::MarketService;
