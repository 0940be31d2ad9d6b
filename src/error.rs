//! Error types for option validation and request handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Misconfigurations detected while validating [`crate::DeepLinkOptions`].
///
/// Raised once, at construction. A middleware that failed validation must not
/// be installed, so every variant is a distinct kind callers can match on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("the login option is required")]
    MissingLogin,

    #[error("the login.local and login.remote options are mutually exclusive (exactly one should be provided)")]
    AmbiguousLoginTarget,

    #[error("either the login.local or login.remote option must be provided")]
    MissingLoginTarget,

    #[error("the login.local.path option must be provided")]
    MissingLocalPath,

    #[error("the login.local.path option must begin with a forward slash, got '{0}'")]
    InvalidLocalPath(String),

    #[error("the login.remote.url option must be provided")]
    MissingRemoteUrl,

    #[error("the authenticated option must be provided")]
    MissingAuthenticatedPredicate,

    #[error("the baseUrl option must be an absolute URL, got '{0}'")]
    InvalidBaseUrl(String),
}

/// Errors raised while deciding how to handle a single request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// The return URL cookie points outside the configured base URL.
    ///
    /// Treated as a tampered cookie or an open-redirect attempt: the request
    /// is rejected instead of discarding the cookie and carrying on.
    #[error("returnUrl must be relative to baseUrl")]
    ReturnUrlNotRelativeToBaseUrl { return_url: String, base_url: String },
}

impl AppError {
    pub fn return_url_not_relative(
        return_url: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::ReturnUrlNotRelativeToBaseUrl {
            return_url: return_url.into(),
            base_url: base_url.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, code, details) = match self {
            AppError::ReturnUrlNotRelativeToBaseUrl {
                return_url,
                base_url,
            } => (
                StatusCode::BAD_REQUEST,
                "return_url_not_relative_to_base_url",
                json!({ "return_url": return_url, "base_url": base_url }),
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
