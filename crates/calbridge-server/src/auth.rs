//! Bearer token extraction.

use axum::http::{HeaderMap, header};
use tracing::{debug, warn};

use calbridge_providers::AccessToken;

use crate::error::ApiError;

/// Exact prefix the Authorization header must carry. Case-sensitive,
/// trailing space included.
const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the bearer token from the `Authorization` header.
///
/// The header must be present and start with the exact `"Bearer "`
/// prefix; the token is everything after it, untrimmed. Anything else is
/// an authentication failure, rejected before any outbound query.
pub fn extract_access_token(headers: &HeaderMap) -> Result<AccessToken, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match header.and_then(|h| h.strip_prefix(BEARER_PREFIX)) {
        Some(token) => {
            debug!("access token extracted from Authorization header");
            Ok(AccessToken::new(token))
        }
        None => {
            warn!("unauthorized: invalid or missing Authorization header");
            Err(ApiError::InvalidAuthHeader)
        }
    }
}
