use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Recoverable request errors, mapped to HTTP at the boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or empty field: {0}")]
    MissingField(&'static str),
    #[error("invalid email address")]
    InvalidEmail,
    #[error("post content must not be empty")]
    EmptyContent,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("account not found")]
    AccountNotFound,
    #[error("approval link already used")]
    ApprovalConsumed,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account is awaiting admin approval")]
    PendingApproval,
    #[error("authentication required")]
    Unauthenticated,
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyContent => "empty_content",
            Self::DuplicateEmail => "duplicate_email",
            Self::AccountNotFound => "account_not_found",
            Self::ApprovalConsumed => "approval_consumed",
            Self::InvalidCredentials => "invalid_credentials",
            Self::PendingApproval => "pending_approval",
            Self::Unauthenticated => "unauthenticated",
            Self::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidEmail | Self::EmptyContent => {
                StatusCode::BAD_REQUEST
            }
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::AccountNotFound => StatusCode::NOT_FOUND,
            Self::ApprovalConsumed => StatusCode::GONE,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::PendingApproval => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Storage errors are logged server-side, never surfaced verbatim.
            Self::Internal(e) => {
                error!(error = %e, "internal error");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        (
            self.status(),
            Json(ErrorBody {
                error: self.code(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::Internal(e.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::MissingField("email").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::EmptyContent.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::AccountNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::ApprovalConsumed.status(), StatusCode::GONE);
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::PendingApproval.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn login_failures_are_distinguishable() {
        // The three login outcomes must carry distinct codes and statuses.
        let not_found = ApiError::AccountNotFound;
        let bad_password = ApiError::InvalidCredentials;
        let pending = ApiError::PendingApproval;
        assert_ne!(not_found.code(), bad_password.code());
        assert_ne!(bad_password.code(), pending.code());
        assert_ne!(not_found.status(), bad_password.status());
        assert_ne!(bad_password.status(), pending.status());
    }

    #[test]
    fn internal_error_message_is_redacted() {
        let resp = ApiError::Internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn sqlx_errors_map_to_internal() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
