use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::GatewayError;
use super::{DocumentStore, Scheme};

fn default_scheme(title: &str, min: u64, max: u64, popular: bool, description: &str) -> Scheme {
    Scheme {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        min_investment: min,
        max_investment: max,
        return_percentage: 40.0,
        duration_months: 1,
        description: description.to_string(),
        is_popular: popular,
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn default_schemes() -> Vec<Scheme> {
    vec![
        default_scheme(
            "Starter Plan",
            5_000,
            25_000,
            false,
            "Entry-level plan for first-time investors.",
        ),
        default_scheme(
            "Growth Plan",
            25_000,
            100_000,
            true,
            "Balanced plan for steady portfolio growth.",
        ),
        default_scheme(
            "Premium Plan",
            100_000,
            500_000,
            false,
            "Actively managed portfolio with priority support.",
        ),
        default_scheme(
            "Elite Plan",
            500_000,
            2_500_000,
            false,
            "Dedicated manager and custom allocation.",
        ),
    ]
}

/// Inserts the default schemes into an empty store. Returns how many were added.
pub async fn seed_defaults(store: &dyn DocumentStore) -> Result<usize, GatewayError> {
    if store.scheme_count().await? > 0 {
        return Ok(0);
    }

    let schemes = default_schemes();
    let added = schemes.len();
    for scheme in schemes {
        store.insert_scheme(scheme).await?;
    }

    info!(added, "seeded default schemes");
    Ok(added)
}
