//! Section service and the products-per-section report.

use common::{Id, ReportProduct, Section, SectionPatch};
use store::entity::SECTION;
use store::{ProductTypeRepository, SectionRepository, WarehouseRepository};

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, report_query, validate, write_failed};

const NUMBER_TAKEN: &str = "section with this section number already exists";

pub struct SectionService<S> {
    store: S,
}

impl<S> SectionService<S>
where
    S: SectionRepository + WarehouseRepository + ProductTypeRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Section>> {
        Ok(self.store.list_sections().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<Section> {
        Ok(self.store.find_section(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, section: Section) -> Result<Section> {
        record(SECTION, Op::Create, self.insert(section).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: SectionPatch) -> Result<Section> {
        record(SECTION, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(SECTION, Op::Delete, self.remove(id).await)
    }

    /// Product batches stored per section.
    #[tracing::instrument(skip(self))]
    pub async fn products_report(&self, id: Option<Id>) -> Result<Vec<ReportProduct>> {
        report_query("section_products");
        Ok(self.store.section_products_report(id).await?)
    }

    async fn insert(&self, section: Section) -> Result<Section> {
        validate(&section)?;
        ensure_unique(
            self.store
                .find_section_by_number(section.section_number)
                .await,
            |found| found.id,
            section.id,
            NUMBER_TAKEN,
        )?;
        self.check_references(&section).await?;

        let section = self
            .store
            .save_section(section)
            .await
            .map_err(|e| write_failed(e, NUMBER_TAKEN))?;
        tracing::info!(section_id = section.id, "section created");
        Ok(section)
    }

    async fn modify(&self, id: Id, patch: SectionPatch) -> Result<Section> {
        let mut section = self.store.find_section(id).await?;
        let prior_number = section.section_number;
        patch.apply(&mut section);

        validate(&section)?;
        if section.section_number != prior_number {
            ensure_unique(
                self.store
                    .find_section_by_number(section.section_number)
                    .await,
                |found| found.id,
                id,
                NUMBER_TAKEN,
            )?;
        }
        self.check_references(&section).await?;

        self.store
            .update_section(&section)
            .await
            .map_err(|e| write_failed(e, NUMBER_TAKEN))?;
        Ok(section)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_section(id).await?;
        self.store.delete_section(id).await?;
        Ok(())
    }

    /// Warehouse first, then product type.
    async fn check_references(&self, section: &Section) -> Result<()> {
        self.store.find_warehouse(section.warehouse_id).await?;
        self.store.find_product_type(section.product_type_id).await?;
        Ok(())
    }
}
