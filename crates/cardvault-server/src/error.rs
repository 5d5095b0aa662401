use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardvault_common::card::CardDecodeError;
use serde_json::json;

/// Domain errors crossing the service boundary.
///
/// Every variant except the last two is a client-visible outcome with a
/// stable message. `CorruptCard` and `Internal` never leak detail to the
/// caller; the full error chain goes to the log instead.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Email is already registered")]
    Conflict,
    #[error("Invalid email or password")]
    Unauthenticated,
    #[error("Not found")]
    NotFound,
    #[error("Card number is not valid")]
    InvalidCardNumber,
    #[error("Share token is not valid")]
    InvalidToken,
    #[error("stored card number is corrupt")]
    CorruptCard(#[from] CardDecodeError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Conflict => StatusCode::BAD_REQUEST,
            ServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::InvalidCardNumber => StatusCode::BAD_REQUEST,
            ServiceError::InvalidToken => StatusCode::BAD_REQUEST,
            ServiceError::CorruptCard(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            // Data corruption and unclassified failures are logged in full
            // and surfaced only as a generic message.
            ServiceError::CorruptCard(e) => {
                tracing::error!("Card record integrity failure: {e}");
                "Internal server error".to_string()
            }
            ServiceError::Internal(e) => {
                tracing::error!("Unhandled error: {e:#}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::Conflict.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::InvalidCardNumber.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidToken.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::CorruptCard(CardDecodeError::Base64)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
