//! Product batch service.

use common::{Id, ProductBatch, ProductBatchPatch};
use store::entity::PRODUCT_BATCH;
use store::{ProductBatchRepository, ProductRepository, SectionRepository};

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, validate, write_failed};

const NUMBER_TAKEN: &str = "product batch with this batch number already exists";

/// Manages batches of a product stored in a section.
pub struct ProductBatchService<S> {
    store: S,
}

impl<S> ProductBatchService<S>
where
    S: ProductBatchRepository + ProductRepository + SectionRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductBatch>> {
        Ok(self.store.list_product_batches().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<ProductBatch> {
        Ok(self.store.find_product_batch(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, batch: ProductBatch) -> Result<ProductBatch> {
        record(PRODUCT_BATCH, Op::Create, self.insert(batch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: ProductBatchPatch) -> Result<ProductBatch> {
        record(PRODUCT_BATCH, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(PRODUCT_BATCH, Op::Delete, self.remove(id).await)
    }

    async fn insert(&self, batch: ProductBatch) -> Result<ProductBatch> {
        validate(&batch)?;
        ensure_unique(
            self.store
                .find_product_batch_by_number(batch.batch_number)
                .await,
            |found| found.id,
            batch.id,
            NUMBER_TAKEN,
        )?;
        self.check_references(&batch).await?;

        let batch = self
            .store
            .save_product_batch(batch)
            .await
            .map_err(|e| write_failed(e, NUMBER_TAKEN))?;
        tracing::info!(
            product_batch_id = batch.id,
            batch_number = batch.batch_number,
            "product batch created"
        );
        Ok(batch)
    }

    async fn modify(&self, id: Id, patch: ProductBatchPatch) -> Result<ProductBatch> {
        let mut batch = self.store.find_product_batch(id).await?;
        let prior_number = batch.batch_number;
        patch.apply(&mut batch);

        validate(&batch)?;
        if batch.batch_number != prior_number {
            ensure_unique(
                self.store
                    .find_product_batch_by_number(batch.batch_number)
                    .await,
                |found| found.id,
                id,
                NUMBER_TAKEN,
            )?;
        }
        self.check_references(&batch).await?;

        self.store
            .update_product_batch(&batch)
            .await
            .map_err(|e| write_failed(e, NUMBER_TAKEN))?;
        Ok(batch)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_product_batch(id).await?;
        self.store.delete_product_batch(id).await?;
        Ok(())
    }

    async fn check_references(&self, batch: &ProductBatch) -> Result<()> {
        self.store.find_product(batch.product_id).await?;
        self.store.find_section(batch.section_id).await?;
        Ok(())
    }
}
