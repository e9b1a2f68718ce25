use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::GatewayError;
use crate::store::{DocumentStore, Scheme, SchemeUpdate};
use super::types::{MessageResponse, SchemeInput, SchemesResponse};

pub async fn list_schemes(
    store: &dyn DocumentStore,
    active_only: bool,
) -> Result<SchemesResponse, GatewayError> {
    let schemes = store.list_schemes(active_only).await?;
    Ok(SchemesResponse { schemes })
}

pub async fn create_scheme(
    store: &dyn DocumentStore,
    input: SchemeInput,
) -> Result<Scheme, GatewayError> {
    input.validate()?;
    check_range(input.min_investment, input.max_investment)?;

    let scheme = Scheme {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        min_investment: input.min_investment,
        max_investment: input.max_investment,
        return_percentage: input.return_percentage,
        duration_months: input.duration_months,
        description: input.description,
        is_popular: input.is_popular,
        is_active: input.is_active,
        created_at: Utc::now(),
    };

    store.insert_scheme(scheme.clone()).await?;
    info!(id = %scheme.id, title = %scheme.title, "scheme created");
    Ok(scheme)
}

pub async fn update_scheme(
    store: &dyn DocumentStore,
    id: &str,
    update: SchemeUpdate,
) -> Result<Scheme, GatewayError> {
    if matches!(&update.title, Some(title) if title.trim().is_empty()) {
        return Err(GatewayError::Validation("title cannot be empty".to_string()));
    }
    if let (Some(min), Some(max)) = (update.min_investment, update.max_investment) {
        check_range(min, max)?;
    }

    let scheme = store
        .update_scheme(id, update)
        .await?
        .ok_or_else(|| GatewayError::NotFound(format!("scheme {}", id)))?;

    info!(id, "scheme updated");
    Ok(scheme)
}

pub async fn delete_scheme(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<MessageResponse, GatewayError> {
    if !store.delete_scheme(id).await? {
        return Err(GatewayError::NotFound(format!("scheme {}", id)));
    }

    info!(id, "scheme deleted");
    Ok(MessageResponse {
        message: "Scheme deleted".to_string(),
    })
}

fn check_range(min: u64, max: u64) -> Result<(), GatewayError> {
    if min > max {
        return Err(GatewayError::Validation(
            "min_investment cannot exceed max_investment".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(title: &str, min: u64, max: u64) -> SchemeInput {
        SchemeInput {
            title: title.to_string(),
            min_investment: min,
            max_investment: max,
            return_percentage: 40.0,
            duration_months: 1,
            description: "Test scheme".to_string(),
            is_popular: false,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let store = MemoryStore::new();

        let created = create_scheme(&store, input("Test Plan", 1_000, 5_000)).await.unwrap();
        assert!(!created.id.is_empty());

        let updated = update_scheme(
            &store,
            &created.id,
            SchemeUpdate {
                title: Some("Updated Test Plan".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "Updated Test Plan");
        assert_eq!(updated.max_investment, 5_000);

        delete_scheme(&store, &created.id).await.unwrap();
        assert!(list_schemes(&store, false).await.unwrap().schemes.is_empty());
    }

    #[tokio::test]
    async fn test_inactive_hidden_by_default_listing() {
        let store = MemoryStore::new();
        let mut hidden = input("Hidden", 1_000, 2_000);
        hidden.is_active = false;
        create_scheme(&store, hidden).await.unwrap();
        create_scheme(&store, input("Visible", 1_000, 2_000)).await.unwrap();

        assert_eq!(list_schemes(&store, true).await.unwrap().schemes.len(), 1);
        assert_eq!(list_schemes(&store, false).await.unwrap().schemes.len(), 2);
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let store = MemoryStore::new();

        let err = create_scheme(&store, input("", 1_000, 5_000)).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));

        let err = create_scheme(&store, input("Upside down", 5_000, 1_000)).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_scheme_is_not_found() {
        let store = MemoryStore::new();

        let err = update_scheme(&store, "nope", SchemeUpdate::default()).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));

        let err = delete_scheme(&store, "nope").await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }
}
