use axum::http::HeaderMap;
use tracing::warn;

use crate::error::GatewayError;
use super::types::{LoginRequest, LoginResponse};

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

pub fn login(expected: &str, request: &LoginRequest) -> Result<LoginResponse, GatewayError> {
    if !passwords_match(expected, &request.password) {
        warn!("admin login rejected");
        return Err(GatewayError::Unauthorized);
    }
    Ok(LoginResponse {
        message: "Login successful".to_string(),
        authenticated: true,
    })
}

/// Checks the admin header on mutating requests.
pub fn authorize(expected: &str, headers: &HeaderMap) -> Result<(), GatewayError> {
    let supplied = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if passwords_match(expected, supplied) {
        Ok(())
    } else {
        warn!("admin request rejected");
        Err(GatewayError::Unauthorized)
    }
}

// Compares every byte so the time taken does not depend on the match position.
fn passwords_match(expected: &str, supplied: &str) -> bool {
    let (a, b) = (expected.as_bytes(), supplied.as_bytes());
    if a.len() != b.len() || a.is_empty() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
