//! Purchase order service.

use common::{Id, PurchaseOrder, PurchaseOrderPatch};
use store::entity::PURCHASE_ORDER;
use store::{BuyerRepository, ProductRecordRepository, PurchaseOrderRepository};

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, validate, write_failed};

const NUMBER_TAKEN: &str = "purchase order with this order number already exists";

/// Manages orders placed by buyers against a product record.
pub struct PurchaseOrderService<S> {
    store: S,
}

impl<S> PurchaseOrderService<S>
where
    S: PurchaseOrderRepository + BuyerRepository + ProductRecordRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PurchaseOrder>> {
        Ok(self.store.list_purchase_orders().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<PurchaseOrder> {
        Ok(self.store.find_purchase_order(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, order: PurchaseOrder) -> Result<PurchaseOrder> {
        record(PURCHASE_ORDER, Op::Create, self.insert(order).await)
    }

    /// A malformed `order_date` in the patch fails before the stored order is touched.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: PurchaseOrderPatch) -> Result<PurchaseOrder> {
        record(PURCHASE_ORDER, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(PURCHASE_ORDER, Op::Delete, self.remove(id).await)
    }

    async fn insert(&self, order: PurchaseOrder) -> Result<PurchaseOrder> {
        validate(&order)?;
        ensure_unique(
            self.store
                .find_purchase_order_by_number(&order.order_number)
                .await,
            |found| found.id,
            order.id,
            NUMBER_TAKEN,
        )?;
        self.check_references(&order).await?;

        let order = self
            .store
            .save_purchase_order(order)
            .await
            .map_err(|e| write_failed(e, NUMBER_TAKEN))?;
        tracing::info!(
            purchase_order_id = order.id,
            buyer_id = order.buyer_id,
            "purchase order created"
        );
        Ok(order)
    }

    async fn modify(&self, id: Id, patch: PurchaseOrderPatch) -> Result<PurchaseOrder> {
        let mut order = self.store.find_purchase_order(id).await?;
        let prior_number = order.order_number.clone();
        patch.apply(&mut order)?;

        validate(&order)?;
        if order.order_number != prior_number {
            ensure_unique(
                self.store
                    .find_purchase_order_by_number(&order.order_number)
                    .await,
                |found| found.id,
                id,
                NUMBER_TAKEN,
            )?;
        }
        self.check_references(&order).await?;

        self.store
            .update_purchase_order(&order)
            .await
            .map_err(|e| write_failed(e, NUMBER_TAKEN))?;
        Ok(order)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_purchase_order(id).await?;
        self.store.delete_purchase_order(id).await?;
        Ok(())
    }

    async fn check_references(&self, order: &PurchaseOrder) -> Result<()> {
        self.store.find_buyer(order.buyer_id).await?;
        self.store
            .find_product_record(order.product_record_id)
            .await?;
        Ok(())
    }
}
