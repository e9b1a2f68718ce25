// src/cache/mod.rs

pub mod clock;
pub mod ttl_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ttl_cache::{CacheEntry, TtlCache};
