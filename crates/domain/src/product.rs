//! Product service and the records-per-product report.

use common::{Id, Product, ProductPatch, ProductRecordsReport};
use store::entity::PRODUCT;
use store::{ProductRepository, ProductTypeRepository, SellerRepository};

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, report_query, validate, write_failed};

const CODE_TAKEN: &str = "product with this product code already exists";

/// Manages the product catalogue. Every product belongs to a seller and has a type.
pub struct ProductService<S> {
    store: S,
}

impl<S> ProductService<S>
where
    S: ProductRepository + SellerRepository + ProductTypeRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<Product> {
        Ok(self.store.find_product(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, product: Product) -> Result<Product> {
        record(PRODUCT, Op::Create, self.insert(product).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: ProductPatch) -> Result<Product> {
        record(PRODUCT, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(PRODUCT, Op::Delete, self.remove(id).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn records_report(&self, id: Option<Id>) -> Result<Vec<ProductRecordsReport>> {
        report_query("product_records");
        Ok(self.store.product_records_report(id).await?)
    }

    async fn insert(&self, product: Product) -> Result<Product> {
        validate(&product)?;
        ensure_unique(
            self.store.find_product_by_code(&product.product_code).await,
            |found| found.id,
            product.id,
            CODE_TAKEN,
        )?;
        self.check_references(&product).await?;

        let product = self
            .store
            .save_product(product)
            .await
            .map_err(|e| write_failed(e, CODE_TAKEN))?;
        tracing::info!(product_id = product.id, code = %product.product_code, "product created");
        Ok(product)
    }

    async fn modify(&self, id: Id, patch: ProductPatch) -> Result<Product> {
        let mut product = self.store.find_product(id).await?;
        let prior_code = product.product_code.clone();
        patch.apply(&mut product);

        validate(&product)?;
        if product.product_code != prior_code {
            ensure_unique(
                self.store.find_product_by_code(&product.product_code).await,
                |found| found.id,
                id,
                CODE_TAKEN,
            )?;
        }
        self.check_references(&product).await?;

        self.store
            .update_product(&product)
            .await
            .map_err(|e| write_failed(e, CODE_TAKEN))?;
        Ok(product)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_product(id).await?;
        self.store.delete_product(id).await?;
        Ok(())
    }

    async fn check_references(&self, product: &Product) -> Result<()> {
        self.store.find_seller(product.seller_id).await?;
        self.store.find_product_type(product.product_type_id).await?;
        Ok(())
    }
}
