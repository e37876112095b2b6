use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Deserialize;
use serde_json::Value;

use crate::entities::warehouse;
use crate::errors::{FieldErrors, ServiceError};
use crate::validation::{deserialize_present, is_falsy, require_text, to_number};

const STATUS_IN_STOCK: &str = "In Stock";

/// Inbound inventory body. `warehouse_id` and `quantity` arrive as raw JSON
/// values because clients send them as numbers or numeric strings.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryPayload {
    pub warehouse_id: Option<Value>,
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub quantity: Option<Value>,
}

/// A validated inventory record with the warehouse reference resolved.
#[derive(Debug, Clone)]
pub struct NewInventory {
    pub warehouse_id: i32,
    pub item_name: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub quantity: i32,
}

/// Validates an inventory body.
///
/// Unlike the warehouse rules there is no short-circuiting branch: every
/// failure, including the referential check against the warehouses table,
/// accumulates into one field-keyed mapping.
///
/// The warehouse lookup runs even when the reference is missing, and a miss
/// overwrites any required-field message already recorded for
/// `warehouse_id`. The lookup and the subsequent insert are two separate
/// round trips; the window between them is accepted.
pub async fn validate(
    payload: &InventoryPayload,
    db: &DatabaseConnection,
) -> Result<NewInventory, ServiceError> {
    let mut errors = FieldErrors::new();

    if is_falsy(payload.warehouse_id.as_ref()) {
        errors.insert("warehouse_id", "Please enter a warehouse ID.".to_string());
    }
    require_text(
        &mut errors,
        "item_name",
        payload.item_name.as_deref(),
        "Please enter an item name.",
    );
    require_text(
        &mut errors,
        "description",
        payload.description.as_deref(),
        "Please enter a description.",
    );
    require_text(
        &mut errors,
        "category",
        payload.category.as_deref(),
        "Please enter a category.",
    );
    require_text(
        &mut errors,
        "status",
        payload.status.as_deref(),
        "Please enter a status.",
    );

    let mut quantity = 0.0;
    match payload.quantity.as_ref() {
        None => {
            errors.insert("quantity", "Please enter a quantity.".to_string());
        }
        Some(value) => match to_number(value) {
            None => {
                errors.insert("quantity", "Please enter a valid quantity.".to_string());
            }
            Some(parsed) => {
                if payload.status.as_deref() == Some(STATUS_IN_STOCK) && parsed == 0.0 {
                    errors.insert(
                        "quantity",
                        "Quantity cannot be 0 when status is 'In Stock'.".to_string(),
                    );
                }
                quantity = parsed;
            }
        },
    }

    let warehouse_id = payload
        .warehouse_id
        .as_ref()
        .and_then(to_number)
        .map(|n| n as i32);

    let warehouse_exists = match warehouse_id {
        Some(id) => warehouse::Entity::find_by_id(id).one(db).await?.is_some(),
        None => false,
    };
    if !warehouse_exists {
        errors.insert(
            "warehouse_id",
            "Please enter a valid warehouse ID.".to_string(),
        );
    }

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    Ok(NewInventory {
        warehouse_id: warehouse_id.unwrap_or_default(),
        item_name: payload.item_name.clone().unwrap_or_default(),
        description: payload.description.clone().unwrap_or_default(),
        category: payload.category.clone().unwrap_or_default(),
        status: payload.status.clone().unwrap_or_default(),
        quantity: quantity as i32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::warehouse;
    use crate::migrator::Migrator;
    use sea_orm::{ActiveModelTrait, Database, Set};
    use sea_orm_migration::MigratorTrait;
    use serde_json::json;

    async fn test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        db
    }

    async fn seed_warehouse(db: &DatabaseConnection) -> i32 {
        let warehouse = warehouse::ActiveModel {
            warehouse_name: Set("Manhattan".to_string()),
            address: Set("503 Broadway".to_string()),
            city: Set("New York".to_string()),
            country: Set("USA".to_string()),
            contact_name: Set("Parmin Aujla".to_string()),
            contact_position: Set("Warehouse Manager".to_string()),
            contact_phone: Set("+1 (646) 123-1234".to_string()),
            contact_email: Set("paujla@instock.com".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("insert warehouse");
        warehouse.id
    }

    fn payload(warehouse_id: Value, quantity: Value, status: &str) -> InventoryPayload {
        InventoryPayload {
            warehouse_id: Some(warehouse_id),
            item_name: Some("Television".to_string()),
            description: Some("55-inch 4K display".to_string()),
            category: Some("Electronics".to_string()),
            status: Some(status.to_string()),
            quantity: Some(quantity),
        }
    }

    #[tokio::test]
    async fn valid_body_resolves_reference() {
        let db = test_db().await;
        let id = seed_warehouse(&db).await;

        let record = validate(&payload(json!(id), json!(25), "In Stock"), &db)
            .await
            .expect("valid payload");
        assert_eq!(record.warehouse_id, id);
        assert_eq!(record.quantity, 25);
    }

    #[tokio::test]
    async fn numeric_string_quantity_is_accepted() {
        let db = test_db().await;
        let id = seed_warehouse(&db).await;

        let record = validate(&payload(json!(id.to_string()), json!("12"), "In Stock"), &db)
            .await
            .expect("coercible payload");
        assert_eq!(record.quantity, 12);
        assert_eq!(record.warehouse_id, id);
    }

    #[tokio::test]
    async fn dangling_reference_is_reported_alongside_other_checks() {
        let db = test_db().await;

        match validate(&payload(json!(9999), json!(5), "In Stock"), &db).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors["warehouse_id"], "Please enter a valid warehouse ID.");
                assert_eq!(errors.len(), 1);
            }
            other => panic!("expected field mapping, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_reference_gets_the_invalid_message() {
        // The referential lookup runs even for a missing id and overwrites
        // the required-field message, as the source behavior did.
        let db = test_db().await;
        let mut body = payload(json!(1), json!(5), "In Stock");
        body.warehouse_id = None;

        match validate(&body, &db).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors["warehouse_id"], "Please enter a valid warehouse ID.");
            }
            other => panic!("expected field mapping, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn in_stock_with_zero_quantity_conflicts() {
        let db = test_db().await;
        let id = seed_warehouse(&db).await;

        match validate(&payload(json!(id), json!(0), "In Stock"), &db).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(
                    errors["quantity"],
                    "Quantity cannot be 0 when status is 'In Stock'."
                );
            }
            other => panic!("expected stock conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn in_stock_with_positive_quantity_passes() {
        let db = test_db().await;
        let id = seed_warehouse(&db).await;

        assert!(validate(&payload(json!(id), json!(1), "In Stock"), &db)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn out_of_stock_with_zero_quantity_passes() {
        let db = test_db().await;
        let id = seed_warehouse(&db).await;

        let record = validate(&payload(json!(id), json!(0), "Out of Stock"), &db)
            .await
            .expect("zero quantity allowed when not in stock");
        assert_eq!(record.quantity, 0);
    }

    #[tokio::test]
    async fn absent_quantity_is_missing_but_null_coerces_to_zero() {
        let db = test_db().await;
        let id = seed_warehouse(&db).await;

        let mut body = payload(json!(id), json!(1), "In Stock");
        body.quantity = None;
        match validate(&body, &db).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors["quantity"], "Please enter a quantity.");
            }
            other => panic!("expected missing quantity, got {:?}", other),
        }

        // Explicit null coerces to numeric zero and trips the stock rule.
        let body = payload(json!(id), Value::Null, "In Stock");
        match validate(&body, &db).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(
                    errors["quantity"],
                    "Quantity cannot be 0 when status is 'In Stock'."
                );
            }
            other => panic!("expected stock conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_numeric_quantity_is_invalid() {
        let db = test_db().await;
        let id = seed_warehouse(&db).await;

        match validate(&payload(json!(id), json!("plenty"), "In Stock"), &db).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors["quantity"], "Please enter a valid quantity.");
            }
            other => panic!("expected invalid quantity, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn negative_quantity_is_not_rejected() {
        let db = test_db().await;
        let id = seed_warehouse(&db).await;

        let record = validate(&payload(json!(id), json!(-3), "In Stock"), &db)
            .await
            .expect("negative quantities pass validation");
        assert_eq!(record.quantity, -3);
    }

    #[tokio::test]
    async fn all_failures_accumulate_into_one_mapping() {
        let db = test_db().await;

        let body = InventoryPayload {
            warehouse_id: None,
            item_name: None,
            description: Some(String::new()),
            category: None,
            status: None,
            quantity: None,
        };

        match validate(&body, &db).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.len(), 6);
                assert_eq!(errors["item_name"], "Please enter an item name.");
                assert_eq!(errors["description"], "Please enter a description.");
                assert_eq!(errors["category"], "Please enter a category.");
                assert_eq!(errors["status"], "Please enter a status.");
                assert_eq!(errors["quantity"], "Please enter a quantity.");
                assert_eq!(errors["warehouse_id"], "Please enter a valid warehouse ID.");
            }
            other => panic!("expected accumulated mapping, got {:?}", other),
        }
    }
}
