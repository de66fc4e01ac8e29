use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use valant_core::{CreateOutcome, Item, ItemId, NewItem};

use super::error::{map_inventory_error, AppError};
use super::SharedState;

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn list_items(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Item>>, AppError> {
    let items = state.inventory.list().await.map_err(map_inventory_error)?;
    Ok(Json(items))
}

/// Responds 201 for a new label and 422 for an existing one. The body is
/// empty either way; `Location` names the stored item in both cases.
pub(super) async fn create_item(
    State(state): State<SharedState>,
    req: Result<Json<NewItem>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = req.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let outcome = state
        .inventory
        .create(input)
        .await
        .map_err(map_inventory_error)?;

    let status = match outcome {
        CreateOutcome::Created(_) => StatusCode::CREATED,
        CreateOutcome::Duplicate(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let location = item_location(outcome.item().id)?;

    Ok((status, [(header::LOCATION, location)]).into_response())
}

pub(super) async fn delete_item(
    State(state): State<SharedState>,
    Path(label): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .inventory
        .delete(&label)
        .await
        .map_err(map_inventory_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==============================================================================
// Helpers
// ==============================================================================

/// Item URI under the service base path `/`.
fn item_location(id: ItemId) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!("/{id}"))
        .map_err(|e| AppError::Internal(format!("invalid location header: {e}")))
}
