//! API error taxonomy and its HTTP mapping.
//!
//! Only two things can fail on a request path: token extraction and the
//! outbound provider query. Both are translated here; nothing escapes
//! unformatted to the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use calbridge_providers::{ProviderError, ProviderErrorCode};

use crate::response::ErrorBody;

/// Message returned with 401 responses.
pub const AUTH_REQUIRED_MESSAGE: &str =
    "Autorización requerida. Encabezado 'Authorization' no encontrado o inválido.";

/// Prefix of 500 bodies caused by a provider transport failure.
pub const PROVIDER_ERROR_PREFIX: &str = "Error al crear evento";

/// Body of 500 responses that must not leak internal detail.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Ocurrió un error inesperado";

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a request handler can produce.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authorization header absent or missing the exact "Bearer " prefix.
    #[error("invalid or missing Authorization header")]
    InvalidAuthHeader,

    /// The outbound calendar query failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidAuthHeader => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody::new(AUTH_REQUIRED_MESSAGE)),
            )
                .into_response(),
            Self::Provider(err) => {
                error!(code = %err.code(), error = %err, "calendar query failed");
                let body = match err.code() {
                    // A body we failed to parse is an internal problem;
                    // don't echo parser detail to the caller.
                    ProviderErrorCode::InvalidResponse => UNEXPECTED_ERROR_MESSAGE.to_string(),
                    _ => format!("{}: {}", PROVIDER_ERROR_PREFIX, err.message()),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_maps_to_401() {
        let response = ApiError::InvalidAuthHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn provider_error_maps_to_500() {
        let err = ApiError::from(ProviderError::network("connection refused"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_response_maps_to_500() {
        let err = ApiError::from(ProviderError::invalid_response("bad json"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
