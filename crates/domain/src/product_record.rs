//! Product record service. Records have no natural key; each write restamps
//! `last_update_date` with the current time.

use chrono::Utc;
use common::{Id, ProductRecord, ProductRecordPatch};
use store::entity::PRODUCT_RECORD;
use store::{ProductRecordRepository, ProductRepository};

use crate::error::Result;
use crate::protocol::{self, Op, validate};

pub struct ProductRecordService<S> {
    store: S,
}

impl<S> ProductRecordService<S>
where
    S: ProductRecordRepository + ProductRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.store.list_product_records().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<ProductRecord> {
        Ok(self.store.find_product_record(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, record: ProductRecord) -> Result<ProductRecord> {
        protocol::record(PRODUCT_RECORD, Op::Create, self.insert(record).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: ProductRecordPatch) -> Result<ProductRecord> {
        protocol::record(PRODUCT_RECORD, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        protocol::record(PRODUCT_RECORD, Op::Delete, self.remove(id).await)
    }

    async fn insert(&self, mut record: ProductRecord) -> Result<ProductRecord> {
        record.last_update_date = Utc::now();
        validate(&record)?;
        self.store.find_product(record.product_id).await?;

        let record = self.store.save_product_record(record).await?;
        tracing::info!(
            product_record_id = record.id,
            product_id = record.product_id,
            "product record created"
        );
        Ok(record)
    }

    async fn modify(&self, id: Id, patch: ProductRecordPatch) -> Result<ProductRecord> {
        let mut record = self.store.find_product_record(id).await?;
        patch.apply(&mut record, Utc::now());

        validate(&record)?;
        self.store.find_product(record.product_id).await?;

        self.store.update_product_record(&record).await?;
        Ok(record)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_product_record(id).await?;
        self.store.delete_product_record(id).await?;
        Ok(())
    }
}
