// src/store/mod.rs

use async_trait::async_trait;

use crate::error::GatewayError;

pub mod models;
pub mod memory;
pub mod seed;

pub use models::{Scheme, SchemeUpdate, SettingsUpdate, SiteSettings, Subscriber};
pub use memory::MemoryStore;

/// Single-document persistence for the site's business entities.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_schemes(&self, active_only: bool) -> Result<Vec<Scheme>, GatewayError>;
    async fn insert_scheme(&self, scheme: Scheme) -> Result<(), GatewayError>;
    async fn update_scheme(&self, id: &str, update: SchemeUpdate) -> Result<Option<Scheme>, GatewayError>;
    async fn delete_scheme(&self, id: &str) -> Result<bool, GatewayError>;
    async fn scheme_count(&self) -> Result<usize, GatewayError>;

    async fn get_settings(&self) -> Result<SiteSettings, GatewayError>;
    async fn update_settings(&self, update: SettingsUpdate) -> Result<SiteSettings, GatewayError>;

    async fn find_subscriber(&self, email: &str) -> Result<Option<Subscriber>, GatewayError>;
    /// Stores the subscriber unless the address (any letter case) is already
    /// present. Returns whether it was added.
    async fn insert_subscriber(&self, subscriber: Subscriber) -> Result<bool, GatewayError>;
}
