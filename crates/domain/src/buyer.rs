//! Buyer service and the purchase-orders-per-buyer report.

use common::{Buyer, BuyerPatch, Id, PurchaseOrdersByBuyer};
use store::BuyerRepository;
use store::entity::BUYER;

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, report_query, validate, write_failed};

const CARD_TAKEN: &str = "buyer with this card number already exists";

pub struct BuyerService<S> {
    store: S,
}

impl<S: BuyerRepository> BuyerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Buyer>> {
        Ok(self.store.list_buyers().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<Buyer> {
        Ok(self.store.find_buyer(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, buyer: Buyer) -> Result<Buyer> {
        record(BUYER, Op::Create, self.insert(buyer).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: BuyerPatch) -> Result<Buyer> {
        record(BUYER, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(BUYER, Op::Delete, self.remove(id).await)
    }

    /// Purchase orders per buyer. Buyers without orders are reported with a zero count.
    #[tracing::instrument(skip(self))]
    pub async fn purchase_orders_report(
        &self,
        id: Option<Id>,
    ) -> Result<Vec<PurchaseOrdersByBuyer>> {
        report_query("buyer_purchase_orders");
        Ok(self.store.purchase_orders_report(id).await?)
    }

    async fn insert(&self, buyer: Buyer) -> Result<Buyer> {
        validate(&buyer)?;
        ensure_unique(
            self.store
                .find_buyer_by_card_number(&buyer.card_number_id)
                .await,
            |found| found.id,
            buyer.id,
            CARD_TAKEN,
        )?;

        let buyer = self
            .store
            .save_buyer(buyer)
            .await
            .map_err(|e| write_failed(e, CARD_TAKEN))?;
        tracing::info!(buyer_id = buyer.id, "buyer created");
        Ok(buyer)
    }

    async fn modify(&self, id: Id, patch: BuyerPatch) -> Result<Buyer> {
        let mut buyer = self.store.find_buyer(id).await?;
        let prior_card = buyer.card_number_id.clone();
        patch.apply(&mut buyer);

        validate(&buyer)?;
        if buyer.card_number_id != prior_card {
            ensure_unique(
                self.store
                    .find_buyer_by_card_number(&buyer.card_number_id)
                    .await,
                |found| found.id,
                id,
                CARD_TAKEN,
            )?;
        }

        self.store
            .update_buyer(&buyer)
            .await
            .map_err(|e| write_failed(e, CARD_TAKEN))?;
        Ok(buyer)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_buyer(id).await?;
        self.store.delete_buyer(id).await?;
        Ok(())
    }
}
