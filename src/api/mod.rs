// src/api/mod.rs

pub mod types;
pub mod market;
pub mod schemes;
pub mod newsletter;
pub mod site;
pub mod admin;

pub use types::{SchemeInput, NewsletterSubscribe, TopCoinsQuery, DEFAULT_TOP_COINS_LIMIT};
pub use market::{MarketService, MAX_TOP_COINS_LIMIT};
