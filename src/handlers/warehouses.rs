use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::errors::ServiceError;
use crate::handlers::{created_response, no_content_response, success_response};
use crate::validation::warehouse::{self as rules, WarehousePayload};
use crate::AppState;

/// Routes for the warehouse resource, nested under `/warehouses`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route(
            "/:id",
            get(get_warehouse)
                .put(update_warehouse)
                .delete(delete_warehouse),
        )
        .route("/:id/inventories", get(warehouse_inventories))
}

/// List all warehouses
async fn list_warehouses(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let warehouses = state.warehouses.list().await?;
    Ok(success_response(warehouses))
}

/// Get one warehouse by id
async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let warehouse = state.warehouses.find_one(id).await?;
    Ok(success_response(warehouse))
}

/// Validate and create a warehouse. Responds 201 with the re-read row
/// sequence for the new identity.
async fn create_warehouse(
    State(state): State<AppState>,
    Json(payload): Json<WarehousePayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let record = rules::validate(payload)?;
    let created = state.warehouses.create(record).await?;
    Ok(created_response(created))
}

/// Validate and fully replace a warehouse. Validation failures take
/// precedence over not-found: the identity is only checked at the update.
async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<WarehousePayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let record = rules::validate(payload)?;
    let updated = state.warehouses.edit(id, record).await?;
    Ok(success_response(updated))
}

/// Delete a warehouse by id
async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.warehouses.remove(id).await?;
    Ok(no_content_response())
}

/// List the inventory rows stored in a warehouse
async fn warehouse_inventories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let inventories = state.warehouses.inventories_of(id).await?;
    Ok(success_response(inventories))
}
