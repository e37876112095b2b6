use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, instrument};

use crate::entities::{inventory, warehouse};
use crate::errors::ServiceError;
use crate::validation::inventory::NewInventory;

/// Inventory row joined with its warehouse's display name. Rows whose
/// warehouse reference does not resolve are excluded by the inner join.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct InventoryWithWarehouse {
    pub id: i32,
    pub warehouse_name: String,
    pub item_name: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub quantity: i32,
}

/// Inventory row as returned by the edit read-back: unjoined, without the
/// timestamp columns.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct InventoryRecord {
    pub id: i32,
    pub warehouse_id: i32,
    pub item_name: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub quantity: i32,
}

/// Repository for inventory rows.
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DatabaseConnection>,
}

impl InventoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn joined_select() -> sea_orm::Select<inventory::Entity> {
        inventory::Entity::find()
            .join(JoinType::InnerJoin, inventory::Relation::Warehouse.def())
            .select_only()
            .column(inventory::Column::Id)
            .column(warehouse::Column::WarehouseName)
            .column(inventory::Column::ItemName)
            .column(inventory::Column::Description)
            .column(inventory::Column::Category)
            .column(inventory::Column::Status)
            .column(inventory::Column::Quantity)
    }

    /// All inventory rows joined with their warehouse name.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<InventoryWithWarehouse>, ServiceError> {
        Self::joined_select()
            .into_model::<InventoryWithWarehouse>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list inventory items");
                ServiceError::InternalError("Error retrieving inventory items.".to_string())
            })
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i32) -> Result<InventoryWithWarehouse, ServiceError> {
        let found = Self::joined_select()
            .filter(inventory::Column::Id.eq(id))
            .into_model::<InventoryWithWarehouse>()
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to fetch inventory item");
                ServiceError::InternalError(format!(
                    "Unable to retrieve item data for item with ID {}",
                    id
                ))
            })?;

        found.ok_or_else(|| ServiceError::NotFound(format!("Item with ID {} not found", id)))
    }

    /// Inserts the record, then re-reads by the assigned identity,
    /// returning the unjoined row sequence.
    #[instrument(skip(self, record))]
    pub async fn create(&self, record: NewInventory) -> Result<Vec<inventory::Model>, ServiceError> {
        let db = self.db.as_ref();

        let row = inventory::ActiveModel {
            warehouse_id: Set(record.warehouse_id),
            item_name: Set(record.item_name),
            description: Set(record.description),
            category: Set(record.category),
            status: Set(record.status),
            quantity: Set(record.quantity),
            ..Default::default()
        };

        let inserted = inventory::Entity::insert(row).exec(db).await.map_err(|e| {
            error!(error = %e, "Failed to insert inventory item");
            ServiceError::InternalError(format!("Unable to create new inventory item: {}", e))
        })?;

        inventory::Entity::find()
            .filter(inventory::Column::Id.eq(inserted.last_insert_id))
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to re-read created inventory item");
                ServiceError::InternalError(format!("Unable to create new inventory item: {}", e))
            })
    }

    /// Full-record replace; re-reads with the unjoined projection.
    #[instrument(skip(self, record))]
    pub async fn edit(&self, id: i32, record: NewInventory) -> Result<InventoryRecord, ServiceError> {
        let db = self.db.as_ref();

        let row = inventory::ActiveModel {
            warehouse_id: Set(record.warehouse_id),
            item_name: Set(record.item_name),
            description: Set(record.description),
            category: Set(record.category),
            status: Set(record.status),
            quantity: Set(record.quantity),
            ..Default::default()
        };

        let updated = inventory::Entity::update_many()
            .set(row)
            .filter(inventory::Column::Id.eq(id))
            .exec(db)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to update inventory item");
                ServiceError::InternalError(format!("Unable to edit inventory: {}", e))
            })?;

        if updated.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Inventory with ID {} not found",
                id
            )));
        }

        inventory::Entity::find_by_id(id)
            .select_only()
            .column(inventory::Column::Id)
            .column(inventory::Column::WarehouseId)
            .column(inventory::Column::ItemName)
            .column(inventory::Column::Description)
            .column(inventory::Column::Category)
            .column(inventory::Column::Status)
            .column(inventory::Column::Quantity)
            .into_model::<InventoryRecord>()
            .one(db)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to re-read updated inventory item");
                ServiceError::InternalError(format!("Unable to edit inventory: {}", e))
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("Inventory with ID {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> Result<(), ServiceError> {
        let deleted = inventory::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to delete inventory item");
                ServiceError::InternalError(format!("Unable to delete item: {}", e))
            })?;

        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Item with ID {} not found",
                id
            )));
        }
        Ok(())
    }
}
