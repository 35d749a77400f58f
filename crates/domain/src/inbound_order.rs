//! Inbound order service.

use common::{Id, InboundOrder, InboundOrderPatch};
use store::entity::INBOUND_ORDER;
use store::{
    EmployeeRepository, InboundOrderRepository, ProductBatchRepository, WarehouseRepository,
};

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, validate, write_failed};

const NUMBER_TAKEN: &str = "inbound order with this order number already exists";

/// Manages receipts of product batches into a warehouse, registered by an employee.
pub struct InboundOrderService<S> {
    store: S,
}

impl<S> InboundOrderService<S>
where
    S: InboundOrderRepository + EmployeeRepository + ProductBatchRepository + WarehouseRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<InboundOrder>> {
        Ok(self.store.list_inbound_orders().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<InboundOrder> {
        Ok(self.store.find_inbound_order(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, order: InboundOrder) -> Result<InboundOrder> {
        record(INBOUND_ORDER, Op::Create, self.insert(order).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: InboundOrderPatch) -> Result<InboundOrder> {
        record(INBOUND_ORDER, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(INBOUND_ORDER, Op::Delete, self.remove(id).await)
    }

    async fn insert(&self, order: InboundOrder) -> Result<InboundOrder> {
        validate(&order)?;
        ensure_unique(
            self.store
                .find_inbound_order_by_number(&order.order_number)
                .await,
            |found| found.id,
            order.id,
            NUMBER_TAKEN,
        )?;
        self.check_references(&order).await?;

        let order = self
            .store
            .save_inbound_order(order)
            .await
            .map_err(|e| write_failed(e, NUMBER_TAKEN))?;
        tracing::info!(inbound_order_id = order.id, "inbound order created");
        Ok(order)
    }

    async fn modify(&self, id: Id, patch: InboundOrderPatch) -> Result<InboundOrder> {
        let mut order = self.store.find_inbound_order(id).await?;
        let prior_number = order.order_number.clone();
        patch.apply(&mut order)?;

        validate(&order)?;
        if order.order_number != prior_number {
            ensure_unique(
                self.store
                    .find_inbound_order_by_number(&order.order_number)
                    .await,
                |found| found.id,
                id,
                NUMBER_TAKEN,
            )?;
        }
        self.check_references(&order).await?;

        self.store
            .update_inbound_order(&order)
            .await
            .map_err(|e| write_failed(e, NUMBER_TAKEN))?;
        Ok(order)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_inbound_order(id).await?;
        self.store.delete_inbound_order(id).await?;
        Ok(())
    }

    /// Employee, then product batch, then warehouse.
    async fn check_references(&self, order: &InboundOrder) -> Result<()> {
        self.store.find_employee(order.employee_id).await?;
        self.store.find_product_batch(order.product_batch_id).await?;
        self.store.find_warehouse(order.warehouse_id).await?;
        Ok(())
    }
}
