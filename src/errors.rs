use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::error;

/// Field-keyed error mapping: one human-readable message per invalid field,
/// reported together rather than failing on the first error.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::error::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Accumulated per-field validation failures, rendered as
    /// `{"errorMessage": {field: message}}`.
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Short-circuiting single-message validation failure, rendered as
    /// `{"message": ...}`. Only the warehouse email/phone format checks
    /// take this branch; the asymmetry with `Validation` is intentional
    /// legacy behavior.
    #[error("{0}")]
    InvalidFormat(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DatabaseError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Validation(errors) => {
                (status, Json(json!({ "errorMessage": errors }))).into_response()
            }
            Self::InvalidFormat(message) | Self::NotFound(message) => {
                (status, Json(json!({ "message": message }))).into_response()
            }
            Self::DatabaseError(e) => {
                error!(error = %e, "Unhandled database error");
                (status, Json(json!({ "message": format!("Database error: {}", e) })))
                    .into_response()
            }
            Self::InternalError(message) => {
                error!(%message, "Request failed");
                (status, Json(json!({ "message": message }))).into_response()
            }
        }
    }
}
