use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::GatewayError;
use crate::store::{DocumentStore, Subscriber};
use super::types::{NewsletterSubscribe, SubscribeResponse, SubscribeStatus};

/// Records a sign-up. Repeating an address (any letter case) is not an error.
pub async fn subscribe(
    store: &dyn DocumentStore,
    request: NewsletterSubscribe,
) -> Result<SubscribeResponse, GatewayError> {
    let request = NewsletterSubscribe {
        email: request.email.trim().to_string(),
    };
    request.validate()?;

    let added = store
        .insert_subscriber(Subscriber {
            id: Uuid::new_v4().to_string(),
            email: request.email,
            subscribed_at: Utc::now(),
        })
        .await?;

    if !added {
        return Ok(SubscribeResponse {
            message: "Already subscribed".to_string(),
            status: SubscribeStatus::Exists,
        });
    }

    info!("newsletter subscription added");
    Ok(SubscribeResponse {
        message: "Successfully subscribed!".to_string(),
        status: SubscribeStatus::Success,
    })
}
