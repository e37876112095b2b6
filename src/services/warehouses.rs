use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QuerySelect, Set,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, instrument};

use crate::entities::{inventory, warehouse};
use crate::errors::ServiceError;
use crate::validation::warehouse::NewWarehouse;

/// Warehouse row as returned by the edit read-back: the full business
/// column set used for create, without the timestamp columns.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct WarehouseRecord {
    pub id: i32,
    pub warehouse_name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub contact_name: String,
    pub contact_position: String,
    pub contact_phone: String,
    pub contact_email: String,
}

/// Inventory row as listed under a warehouse: no join back to the
/// warehouse name (already known to the caller) and no description.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct WarehouseInventoryRecord {
    pub id: i32,
    pub item_name: String,
    pub category: String,
    pub status: String,
    pub quantity: i32,
}

/// Repository for warehouse rows.
#[derive(Clone)]
pub struct WarehouseService {
    db: Arc<DatabaseConnection>,
}

impl WarehouseService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All rows, all columns, no explicit ordering.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<warehouse::Model>, ServiceError> {
        warehouse::Entity::find()
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list warehouses");
                ServiceError::InternalError("Error retrieving warehouse items.".to_string())
            })
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i32) -> Result<warehouse::Model, ServiceError> {
        let found = warehouse::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to fetch warehouse");
                ServiceError::InternalError(format!(
                    "Unable to retrieve warehouse data for warehouse with ID {}",
                    id
                ))
            })?;

        found.ok_or_else(|| ServiceError::NotFound(format!("Warehouse with ID {} not found", id)))
    }

    /// Inserts the record, then re-reads by the assigned identity. The
    /// result is the row sequence matching that identity, preserving the
    /// original create contract.
    #[instrument(skip(self, record))]
    pub async fn create(&self, record: NewWarehouse) -> Result<Vec<warehouse::Model>, ServiceError> {
        let db = self.db.as_ref();

        let row = warehouse::ActiveModel {
            warehouse_name: Set(record.warehouse_name),
            address: Set(record.address),
            city: Set(record.city),
            country: Set(record.country),
            contact_name: Set(record.contact_name),
            contact_position: Set(record.contact_position),
            contact_phone: Set(record.contact_phone),
            contact_email: Set(record.contact_email),
            ..Default::default()
        };

        let inserted = warehouse::Entity::insert(row).exec(db).await.map_err(|e| {
            error!(error = %e, "Failed to insert warehouse");
            ServiceError::InternalError(format!("Unable to create new warehouse: {}", e))
        })?;

        warehouse::Entity::find()
            .filter(warehouse::Column::Id.eq(inserted.last_insert_id))
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to re-read created warehouse");
                ServiceError::InternalError(format!("Unable to create new warehouse: {}", e))
            })
    }

    /// Full-record replace: every editable column is rewritten. Returns the
    /// canonical stored row via an explicit column projection.
    #[instrument(skip(self, record))]
    pub async fn edit(&self, id: i32, record: NewWarehouse) -> Result<WarehouseRecord, ServiceError> {
        let db = self.db.as_ref();

        let row = warehouse::ActiveModel {
            warehouse_name: Set(record.warehouse_name),
            address: Set(record.address),
            city: Set(record.city),
            country: Set(record.country),
            contact_name: Set(record.contact_name),
            contact_position: Set(record.contact_position),
            contact_phone: Set(record.contact_phone),
            contact_email: Set(record.contact_email),
            ..Default::default()
        };

        let updated = warehouse::Entity::update_many()
            .set(row)
            .filter(warehouse::Column::Id.eq(id))
            .exec(db)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to update warehouse");
                ServiceError::InternalError(format!("Unable to edit warehouse: {}", e))
            })?;

        if updated.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Warehouse with ID {} not found",
                id
            )));
        }

        warehouse::Entity::find_by_id(id)
            .select_only()
            .column(warehouse::Column::Id)
            .column(warehouse::Column::WarehouseName)
            .column(warehouse::Column::Address)
            .column(warehouse::Column::City)
            .column(warehouse::Column::Country)
            .column(warehouse::Column::ContactName)
            .column(warehouse::Column::ContactPosition)
            .column(warehouse::Column::ContactPhone)
            .column(warehouse::Column::ContactEmail)
            .into_model::<WarehouseRecord>()
            .one(db)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to re-read updated warehouse");
                ServiceError::InternalError(format!("Unable to edit warehouse: {}", e))
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("Warehouse with ID {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> Result<(), ServiceError> {
        let deleted = warehouse::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to delete warehouse");
                ServiceError::InternalError(format!("Unable to delete warehouse: {}", e))
            })?;

        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Warehouse with ID {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Inventory rows belonging to a warehouse. The warehouse must exist;
    /// the rows themselves are projected without a join.
    #[instrument(skip(self))]
    pub async fn inventories_of(
        &self,
        id: i32,
    ) -> Result<Vec<WarehouseInventoryRecord>, ServiceError> {
        let db = self.db.as_ref();

        let exists = warehouse::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to check warehouse existence");
                ServiceError::InternalError(format!(
                    "Unable to retrieve inventories for warehouse ID {}",
                    id
                ))
            })?;
        if exists.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Warehouse with ID {} not found",
                id
            )));
        }

        inventory::Entity::find()
            .select_only()
            .column(inventory::Column::Id)
            .column(inventory::Column::ItemName)
            .column(inventory::Column::Category)
            .column(inventory::Column::Status)
            .column(inventory::Column::Quantity)
            .filter(inventory::Column::WarehouseId.eq(id))
            .into_model::<WarehouseInventoryRecord>()
            .all(db)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Failed to list warehouse inventories");
                ServiceError::InternalError(format!(
                    "Unable to retrieve inventories for warehouse ID {}",
                    id
                ))
            })
    }
}
