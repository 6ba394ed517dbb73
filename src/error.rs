use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::{
    auth::{jwt::TokenError, password::PasswordError},
    users::repo::StoreError,
};

/// Every failure a handler can answer with. Each variant is terminal for the request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),

    /// Wrong password and unknown email share this variant so the response is identical.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired bearer token.
    #[error("unauthorized")]
    Unauthorized,

    #[error("User not found")]
    NotFound,

    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message,
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => Self::NotFound,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        warn!(error = %e, "request body rejected");
        Self::Validation("Invalid JSON body")
    }
}

/// An id that is not a number cannot name any user.
impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        warn!(error = %e, "path rejected");
        Self::NotFound
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        let message = match e {
            PasswordError::Verification(_) => "Error verifying password",
            PasswordError::Hashing(_) | PasswordError::Task(_) => "Error hashing password",
        };
        Self::internal(message, e)
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Signing(_) | TokenError::ExpiryOutOfRange => {
                Self::internal("Error signing token", e)
            }
            _ => Self::Unauthorized,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Unauthorized => status.into_response(),
            Self::Internal { message, source } => {
                error!(error = %source, "{message}");
                (status, message).into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, String) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        (status, String::from_utf8(bytes.to_vec()).expect("utf8"))
    }

    #[tokio::test]
    async fn maps_taxonomy_to_status_codes() {
        assert_eq!(
            body_of(ApiError::Validation("Password is required")).await,
            (StatusCode::BAD_REQUEST, "Password is required".into())
        );
        assert_eq!(
            body_of(ApiError::InvalidCredentials).await,
            (StatusCode::UNAUTHORIZED, "Invalid email or password".into())
        );
        assert_eq!(
            body_of(ApiError::NotFound).await,
            (StatusCode::NOT_FOUND, "User not found".into())
        );
    }

    #[tokio::test]
    async fn unauthorized_has_no_body_detail() {
        let (status, body) = body_of(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn internal_hides_source() {
        let err = ApiError::from(PasswordError::Hashing("out of memory".into()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error hashing password");
    }

    #[test]
    fn token_failures_collapse_to_unauthorized() {
        assert!(matches!(
            ApiError::from(TokenError::Expired),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(TokenError::InvalidSignature),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(TokenError::ExpiryOutOfRange),
            ApiError::Internal { .. }
        ));
    }
}
