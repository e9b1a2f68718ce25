// src/config.rs
//
// Defaults, overridden by GATEWAY_-prefixed environment variables with `__`
// separating nested keys, e.g. GATEWAY_SERVER__PORT=9000 or
// GATEWAY_TTL__TOP_COINS_SECS=60.

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::error::GatewayError;
use crate::providers::coingecko::DEFAULT_BASE_URL;

pub const ENV_PREFIX: &str = "GATEWAY_";

/// Upper bound on `retry.max_attempts`.
pub const MAX_ATTEMPTS: u32 = 10;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub retry: RetryConfig,
    pub ttl: TtlConfig,
    pub admin: AdminConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// A list, or one comma-separated string as env vars provide it.
    #[serde(deserialize_with = "origin_list")]
    pub cors_origins: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Origins {
    List(Vec<String>),
    Joined(String),
}

fn origin_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let origins = match Origins::deserialize(deserializer)? {
        Origins::List(list) => list,
        Origins::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };
    Ok(origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            cors_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Per-attempt timeout.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Retry tuning. Rate-limited attempts wait `2 * (n + 1)` units before the
/// next try, other failures wait one unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub backoff_unit_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit_ms: 1000,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlConfig {
    pub top_coins_secs: u64,
    pub trending_secs: u64,
    pub global_secs: u64,
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            top_coins_secs: 120,
            trending_secs: 300,
            global_secs: 300,
        }
    }
}

impl TtlConfig {
    pub fn top_coins(&self) -> Duration {
        Duration::from_secs(self.top_coins_secs)
    }

    pub fn trending(&self) -> Duration {
        Duration::from_secs(self.trending_secs)
    }

    pub fn global(&self) -> Duration {
        Duration::from_secs(self.global_secs)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        // Development default; set GATEWAY_ADMIN__PASSWORD in any real deployment.
        Self {
            password: "change-me".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Defaults merged with the process environment.
    pub fn load() -> Result<Self, GatewayError> {
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(GatewayConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, GatewayError> {
        let config: GatewayConfig = figment
            .extract()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), GatewayError> {
        if !(1..=MAX_ATTEMPTS).contains(&self.retry.max_attempts) {
            return Err(GatewayError::Config(format!(
                "retry.max_attempts must be between 1 and {MAX_ATTEMPTS}"
            )));
        }
        if self.ttl.top_coins_secs == 0 || self.ttl.trending_secs == 0 || self.ttl.global_secs == 0 {
            return Err(GatewayError::Config("ttl values must be positive".to_string()));
        }
        if self.upstream.base_url.trim().is_empty() {
            return Err(GatewayError::Config("upstream.base_url is empty".to_string()));
        }
        if self.admin.password.is_empty() {
            return Err(GatewayError::Config("admin.password is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Figment {
        Figment::new().merge(Serialized::defaults(GatewayConfig::default()))
    }

    #[test]
    fn test_defaults_match_upstream_policy() {
        let config = GatewayConfig::from_figment(defaults()).unwrap();

        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff_unit_ms, 1000);
        assert_eq!(config.ttl.top_coins(), Duration::from_secs(120));
        assert_eq!(config.ttl.trending(), Duration::from_secs(300));
        assert_eq!(config.ttl.global(), Duration::from_secs(300));
        assert_eq!(config.upstream.timeout(), Duration::from_secs(15));
        assert_eq!(config.upstream.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.server.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_nested_override() {
        let figment = defaults()
            .merge(Serialized::default("ttl.top_coins_secs", 60))
            .merge(Serialized::default("server.port", 9000));

        let config = GatewayConfig::from_figment(figment).unwrap();

        assert_eq!(config.ttl.top_coins_secs, 60);
        assert_eq!(config.ttl.trending_secs, 300);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let figment = defaults().merge(Serialized::default("retry.max_attempts", 0));

        let err = GatewayConfig::from_figment(figment).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn test_rejects_empty_admin_password() {
        let figment = defaults().merge(Serialized::default("admin.password", ""));

        assert!(GatewayConfig::from_figment(figment).is_err());
    }

    #[test]
    fn test_rejects_excessive_attempts() {
        let figment = defaults().merge(Serialized::default("retry.max_attempts", 1_000_000));

        assert!(GatewayConfig::from_figment(figment).is_err());
    }

    #[test]
    fn test_cors_origins_from_comma_separated_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(
                "GATEWAY_SERVER__CORS_ORIGINS",
                "https://a.example, https://b.example",
            );

            let config = GatewayConfig::load().unwrap();

            assert_eq!(
                config.server.cors_origins,
                vec!["https://a.example".to_string(), "https://b.example".to_string()]
            );
            Ok(())
        });
    }

    #[test]
    fn test_cors_origins_single_value_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GATEWAY_SERVER__CORS_ORIGINS", "*");

            let config = GatewayConfig::load().unwrap();

            assert_eq!(config.server.cors_origins, vec!["*".to_string()]);
            Ok(())
        });
    }

    #[test]
    fn test_cors_origins_list_from_figment() {
        let figment = defaults().merge(Serialized::default(
            "server.cors_origins",
            vec!["https://a.example", "https://b.example"],
        ));

        let config = GatewayConfig::from_figment(figment).unwrap();

        assert_eq!(config.server.cors_origins.len(), 2);
    }
}
