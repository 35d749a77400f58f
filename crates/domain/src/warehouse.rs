//! Warehouse service.

use common::{Id, Warehouse, WarehousePatch};
use store::WarehouseRepository;
use store::entity::WAREHOUSE;

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, validate, write_failed};

const CODE_TAKEN: &str = "warehouse with this code already exists";

/// Manages warehouses. Temperature range and telephone format are checked by
/// [`Warehouse`]'s validation; this service adds `warehouse_code` uniqueness.
pub struct WarehouseService<S> {
    store: S,
}

impl<S: WarehouseRepository> WarehouseService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Warehouse>> {
        Ok(self.store.list_warehouses().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<Warehouse> {
        Ok(self.store.find_warehouse(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, warehouse: Warehouse) -> Result<Warehouse> {
        record(WAREHOUSE, Op::Create, self.insert(warehouse).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: WarehousePatch) -> Result<Warehouse> {
        record(WAREHOUSE, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(WAREHOUSE, Op::Delete, self.remove(id).await)
    }

    async fn insert(&self, warehouse: Warehouse) -> Result<Warehouse> {
        validate(&warehouse)?;
        ensure_unique(
            self.store
                .find_warehouse_by_code(&warehouse.warehouse_code)
                .await,
            |found| found.id,
            warehouse.id,
            CODE_TAKEN,
        )?;

        let warehouse = self
            .store
            .save_warehouse(warehouse)
            .await
            .map_err(|e| write_failed(e, CODE_TAKEN))?;
        tracing::info!(
            warehouse_id = warehouse.id,
            code = %warehouse.warehouse_code,
            "warehouse created"
        );
        Ok(warehouse)
    }

    async fn modify(&self, id: Id, patch: WarehousePatch) -> Result<Warehouse> {
        let mut warehouse = self.store.find_warehouse(id).await?;
        let prior_code = warehouse.warehouse_code.clone();
        patch.apply(&mut warehouse);

        validate(&warehouse)?;
        if warehouse.warehouse_code != prior_code {
            ensure_unique(
                self.store
                    .find_warehouse_by_code(&warehouse.warehouse_code)
                    .await,
                |found| found.id,
                id,
                CODE_TAKEN,
            )?;
        }

        self.store
            .update_warehouse(&warehouse)
            .await
            .map_err(|e| write_failed(e, CODE_TAKEN))?;
        Ok(warehouse)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_warehouse(id).await?;
        self.store.delete_warehouse(id).await?;
        Ok(())
    }
}
