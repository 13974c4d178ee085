// Part catalog: categories, parts, BOM, suppliers
pub mod parts;

// Stock locations, stock items and tracking
pub mod stock;

// Build orders
pub mod builds;

use std::sync::Arc;

use crate::db::DbPool;

use self::{builds::BuildService, parts::PartService, stock::StockService};

/// Service container sharing one database pool.
#[derive(Clone)]
pub struct ServiceContainer {
    pub parts: PartService,
    pub stock: StockService,
    pub builds: BuildService,
    db_pool: Arc<DbPool>,
}

impl ServiceContainer {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            parts: PartService::new(db_pool.clone()),
            stock: StockService::new(db_pool.clone()),
            builds: BuildService::new(db_pool.clone()),
            db_pool,
        }
    }

    /// Gets a reference to the database pool
    pub fn db_pool(&self) -> &Arc<DbPool> {
        &self.db_pool
    }
}
