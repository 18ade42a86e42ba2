//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors render as
//! `{"success": false, "error": "..."}` with a status chosen per error kind.
//! Server errors are captured to Sentry before the response is built and
//! their details are not exposed to the client.

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{EntityKind, ServiceError};

/// Application-level error type for the HTTP API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A service rejected the request or failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// JSON body extractor whose rejections render through [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    related_projects_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_count: Option<usize>,
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Internal(_) | Self::Service(ServiceError::Store(_))
        )
    }

    /// HTTP status for this error.
    ///
    /// Duplicate names and blocked deletes map differently for owners and
    /// product lines; the web client relies on both codes.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err {
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
                ServiceError::DuplicateName {
                    entity: EntityKind::Owner,
                    ..
                } => StatusCode::CONFLICT,
                ServiceError::DuplicateName { .. } => StatusCode::BAD_REQUEST,
                ServiceError::Referenced {
                    entity: EntityKind::ProductLine,
                    ..
                } => StatusCode::FORBIDDEN,
                ServiceError::Referenced { .. } => StatusCode::BAD_REQUEST,
                ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        // Don't expose internal error details to clients
        let error = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let (related_projects_count, project_count) = match self {
            Self::Service(ServiceError::Referenced {
                entity: EntityKind::ProductLine,
                count,
            }) => (Some(*count), None),
            Self::Service(ServiceError::Referenced { count, .. }) => (None, Some(*count)),
            _ => (None, None),
        };

        ErrorBody {
            success: false,
            error,
            related_projects_count,
            project_count,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (self.status(), Json(self.body())).into_response()
    }
}
