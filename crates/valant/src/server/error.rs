use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use valant_core::InventoryError;

// ==============================================================================
// Error Type
// ==============================================================================

/// Every failure leaving a handler goes through this type, so clients only
/// ever see `{"error": <code>, "message": <text>}` bodies.
#[derive(Debug)]
pub(crate) enum AppError {
    BadRequest(String),
    LabelNotFound(String),
    /// The delete was applied; only its notification failed. Reported as
    /// 206 Partial Content, which existing clients rely on.
    NotificationFailed(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::LabelNotFound(msg) => (StatusCode::NOT_FOUND, "label_not_found", msg),
            Self::NotificationFailed(msg) => {
                (StatusCode::PARTIAL_CONTENT, "notification_failed", msg)
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({ "error": code, "message": message })),
        )
            .into_response()
    }
}

pub(super) fn map_inventory_error(err: InventoryError) -> AppError {
    match err {
        InventoryError::LabelNotFound(_) => AppError::LabelNotFound(err.to_string()),
        InventoryError::NotificationFailed { .. } => AppError::NotificationFailed(err.to_string()),
        InventoryError::Store(core) => AppError::Internal(core.to_string()),
    }
}
