use tracing::{error, warn};

use crate::cache::TtlCache;
use crate::error::{FetchError, GatewayError};
use crate::types::Payload;

use super::FetchRequest;

/// Picks what to serve after a failed fetch.
///
/// Any cached entry for the key wins, however old, since it is real data.
/// Then the request's static fallback. Only when both are missing does the
/// failure reach the caller.
pub async fn resolve_fallback(
    cache: &TtlCache<Payload>,
    request: &FetchRequest,
    cause: FetchError,
) -> Result<Payload, GatewayError> {
    if let Some(stale) = cache.get_stale(&request.key).await {
        warn!(key = %request.key, error = %cause, "serving stale cache entry");
        return Ok(stale);
    }

    if let Some(fallback) = &request.fallback {
        warn!(key = %request.key, error = %cause, "serving static fallback");
        return Ok(Payload::Normalized(fallback.clone()));
    }

    error!(key = %request.key, error = %cause, "no data available");
    Err(GatewayError::NoDataAvailable {
        key: request.key.clone(),
        source: cause,
    })
}
