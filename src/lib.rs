//! InStock API Library
//!
//! Warehouse and inventory management over HTTP, backed by a relational store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod phone;
pub mod services;
pub mod validation;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use services::inventories::InventoryService;
use services::warehouses::WarehouseService;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub warehouses: WarehouseService,
    pub inventories: InventoryService,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let warehouses = WarehouseService::new(db.clone());
        let inventories = InventoryService::new(db.clone());
        Self {
            db,
            config,
            warehouses,
            inventories,
        }
    }
}

/// All API routes, mounted by the binary under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/warehouses", handlers::warehouses::router())
        .nest("/inventories", handlers::inventories::router())
}
