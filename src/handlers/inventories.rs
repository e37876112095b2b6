use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::errors::ServiceError;
use crate::handlers::{created_response, no_content_response, success_response};
use crate::validation::inventory::{self as rules, InventoryPayload};
use crate::AppState;

/// Routes for the inventory resource, nested under `/inventories`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventories).post(create_inventory))
        .route(
            "/:id",
            get(get_inventory)
                .put(update_inventory)
                .delete(delete_inventory),
        )
}

/// List all inventory items joined with their warehouse name
async fn list_inventories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.inventories.list().await?;
    Ok(success_response(items))
}

/// Get one joined inventory item by id
async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.inventories.find_one(id).await?;
    Ok(success_response(item))
}

/// Validate (including the referential warehouse check) and create an
/// inventory item. Responds 201 with the re-read row sequence.
async fn create_inventory(
    State(state): State<AppState>,
    Json(payload): Json<InventoryPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let record = rules::validate(&payload, state.db.as_ref()).await?;
    let created = state.inventories.create(record).await?;
    Ok(created_response(created))
}

/// Validate and fully replace an inventory item
async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<InventoryPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let record = rules::validate(&payload, state.db.as_ref()).await?;
    let updated = state.inventories.edit(id, record).await?;
    Ok(success_response(updated))
}

/// Delete an inventory item by id, independent of warehouse state
async fn delete_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.inventories.remove(id).await?;
    Ok(no_content_response())
}
