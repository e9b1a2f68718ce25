use crate::error::GatewayError;
use crate::store::{DocumentStore, SettingsUpdate, SiteSettings};
use super::types::{TeamMember, TeamResponse};

pub async fn get_settings(store: &dyn DocumentStore) -> Result<SiteSettings, GatewayError> {
    store.get_settings().await
}

pub async fn update_settings(
    store: &dyn DocumentStore,
    update: SettingsUpdate,
) -> Result<SiteSettings, GatewayError> {
    if matches!(&update.telegram_link, Some(link) if !link.is_empty() && !link.starts_with("https://")) {
        return Err(GatewayError::Validation(
            "telegram_link must be an https URL".to_string(),
        ));
    }
    store.update_settings(update).await
}

const TEAM: [TeamMember; 4] = [
    TeamMember {
        name: "Ankur Agrawal",
        role: "Founder & Lead Portfolio Manager",
        initials: "AA",
        bio: "8+ years in crypto trading. Expert in DeFi and spot trading strategies.",
    },
    TeamMember {
        name: "Radhika Gupta",
        role: "Senior Investment Analyst",
        initials: "RG",
        bio: "Former equity analyst turned crypto specialist. CA qualified.",
    },
    TeamMember {
        name: "Abhay Sharma",
        role: "Risk Management Head",
        initials: "AS",
        bio: "6+ years in financial risk analysis and hedging strategies.",
    },
    TeamMember {
        name: "Rishabh Singh",
        role: "Client Relations Manager",
        initials: "RS",
        bio: "Handles onboarding and investor queries.",
    },
];

pub fn get_team() -> TeamResponse {
    TeamResponse {
        team: TEAM.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_settings_roundtrip_through_store() {
        let store = MemoryStore::new();

        let updated = update_settings(
            &store,
            SettingsUpdate {
                telegram_link: Some("https://t.me/another".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(get_settings(&store).await.unwrap(), updated);
        assert_eq!(updated.telegram_link, "https://t.me/another");
    }

    #[tokio::test]
    async fn test_rejects_non_https_telegram_link() {
        let store = MemoryStore::new();

        let err = update_settings(
            &store,
            SettingsUpdate {
                telegram_link: Some("javascript:alert(1)".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[test]
    fn test_team_roster() {
        let team = get_team().team;
        assert_eq!(team.len(), 4);
        assert!(team.iter().all(|m| m.initials.len() == 2));
    }
}
