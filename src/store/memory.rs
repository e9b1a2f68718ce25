use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::GatewayError;
use super::{DocumentStore, Scheme, SchemeUpdate, SettingsUpdate, SiteSettings, Subscriber};

/// Process-local store. Each operation touches one document.
#[derive(Default)]
pub struct MemoryStore {
    schemes: RwLock<HashMap<String, Scheme>>,
    settings: RwLock<SiteSettings>,
    // keyed by lowercased email
    subscribers: RwLock<HashMap<String, Subscriber>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_schemes(&self, active_only: bool) -> Result<Vec<Scheme>, GatewayError> {
        let schemes = self.schemes.read().await;
        let mut listed: Vec<Scheme> = schemes
            .values()
            .filter(|s| !active_only || s.is_active)
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            a.min_investment
                .cmp(&b.min_investment)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(listed)
    }

    async fn insert_scheme(&self, scheme: Scheme) -> Result<(), GatewayError> {
        self.schemes.write().await.insert(scheme.id.clone(), scheme);
        Ok(())
    }

    async fn update_scheme(&self, id: &str, update: SchemeUpdate) -> Result<Option<Scheme>, GatewayError> {
        let mut schemes = self.schemes.write().await;
        Ok(schemes.get_mut(id).map(|scheme| {
            scheme.apply(update);
            scheme.clone()
        }))
    }

    async fn delete_scheme(&self, id: &str) -> Result<bool, GatewayError> {
        Ok(self.schemes.write().await.remove(id).is_some())
    }

    async fn scheme_count(&self) -> Result<usize, GatewayError> {
        Ok(self.schemes.read().await.len())
    }

    async fn get_settings(&self) -> Result<SiteSettings, GatewayError> {
        Ok(self.settings.read().await.clone())
    }

    async fn update_settings(&self, update: SettingsUpdate) -> Result<SiteSettings, GatewayError> {
        let mut settings = self.settings.write().await;
        settings.apply(update);
        Ok(settings.clone())
    }

    async fn find_subscriber(&self, email: &str) -> Result<Option<Subscriber>, GatewayError> {
        let subscribers = self.subscribers.read().await;
        Ok(subscribers.get(&email.to_lowercase()).cloned())
    }

    async fn insert_subscriber(&self, subscriber: Subscriber) -> Result<bool, GatewayError> {
        let key = subscriber.email.to_lowercase();
        let mut subscribers = self.subscribers.write().await;
        if subscribers.contains_key(&key) {
            return Ok(false);
        }
        subscribers.insert(key, subscriber);
        Ok(true)
    }
}
