use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_TOP_COINS_LIMIT: u32 = 20;

#[derive(Clone, Debug, Deserialize)]
pub struct TopCoinsQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 { DEFAULT_TOP_COINS_LIMIT }
fn default_true() -> bool { true }

#[derive(Clone, Debug, Deserialize)]
pub struct SchemesQuery {
    #[serde(default = "default_true")]
    pub active_only: bool,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct SchemeInput {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    pub min_investment: u64,
    pub max_investment: u64,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub return_percentage: f64,
    #[validate(range(min = 1, max = 120))]
    pub duration_months: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SchemesResponse {
    pub schemes: Vec<crate::store::Scheme>,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewsletterSubscribe {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SubscribeStatus {
    Success,
    Exists,
}

#[derive(Clone, Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: String,
    pub status: SubscribeStatus,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub authenticated: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub initials: &'static str,
    pub bio: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct TeamResponse {
    pub team: Vec<TeamMember>,
}
