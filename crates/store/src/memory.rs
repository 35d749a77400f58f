use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{
    Buyer, Carrier, CarriesCountPerLocality, Employee, Id, InboundOrder, InboundOrdersPerEmployee,
    Locality, LocalitySellersCount, Product, ProductBatch, ProductRecord, ProductRecordsReport,
    ProductType, PurchaseOrder, PurchaseOrdersByBuyer, ReportProduct, Section, Seller, Warehouse,
};
use tokio::sync::RwLock;

use crate::entity::{
    BUYER, CARRIER, EMPLOYEE, INBOUND_ORDER, LOCALITY, PRODUCT, PRODUCT_BATCH, PRODUCT_RECORD,
    PRODUCT_TYPE, PURCHASE_ORDER, SECTION, SELLER, WAREHOUSE,
};
use crate::repository::{
    BuyerRepository, CarrierRepository, EmployeeRepository, InboundOrderRepository,
    LocalityRepository, ProductBatchRepository, ProductRecordRepository, ProductRepository,
    ProductTypeRepository, PurchaseOrderRepository, SectionRepository, SellerRepository,
    WarehouseRepository,
};
use crate::{Result, StoreError};

/// A row addressable by its surrogate id.
trait Row: Clone {
    fn id(&self) -> Id;
    fn set_id(&mut self, id: Id);
}

macro_rules! impl_row {
    ($($ty:ty),* $(,)?) => {
        $(impl Row for $ty {
            fn id(&self) -> Id {
                self.id
            }

            fn set_id(&mut self, id: Id) {
                self.id = id;
            }
        })*
    };
}

impl_row!(
    Locality,
    Seller,
    Buyer,
    Employee,
    Warehouse,
    ProductType,
    Section,
    Product,
    ProductBatch,
    ProductRecord,
    PurchaseOrder,
    InboundOrder,
    Carrier,
);

/// One table: rows ordered by id plus the last id handed out.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<Id, T>,
    last_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Row> Table<T> {
    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: Id, entity: &'static str) -> Result<T> {
        self.rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::not_found(entity))
    }

    fn contains(&self, id: Id) -> bool {
        self.rows.contains_key(&id)
    }

    fn find(&self, entity: &'static str, pred: impl Fn(&T) -> bool) -> Result<T> {
        self.rows
            .values()
            .find(|&row| pred(row))
            .cloned()
            .ok_or(StoreError::not_found(entity))
    }

    fn count(&self, pred: impl Fn(&T) -> bool) -> i64 {
        self.rows.values().filter(|&row| pred(row)).count() as i64
    }

    fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.rows.values().any(pred)
    }

    /// Simulates a UNIQUE index: fails if another row matches `pred`.
    fn ensure_unique(
        &self,
        entity: &'static str,
        constraint: &str,
        id: Id,
        pred: impl Fn(&T) -> bool,
    ) -> Result<()> {
        if self.rows.values().any(|row| row.id() != id && pred(row)) {
            return Err(StoreError::duplicated(entity, constraint));
        }
        Ok(())
    }

    fn insert(&mut self, mut row: T) -> T {
        self.last_id += 1;
        row.set_id(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    /// Inserts under the row's own id, as a natural primary key.
    fn insert_keyed(&mut self, row: T, entity: &'static str, constraint: &str) -> Result<T> {
        if self.rows.contains_key(&row.id()) {
            return Err(StoreError::duplicated(entity, constraint));
        }
        self.last_id = self.last_id.max(row.id());
        self.rows.insert(row.id(), row.clone());
        Ok(row)
    }

    fn replace(&mut self, row: &T, entity: &'static str) -> Result<()> {
        match self.rows.get_mut(&row.id()) {
            Some(existing) => {
                *existing = row.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(entity)),
        }
    }

    fn remove(&mut self, id: Id, entity: &'static str) -> Result<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::not_found(entity))
    }

    /// Rows matching an optional anchor id; `NotFound` when the anchor is absent.
    fn anchored(&self, id: Option<Id>, entity: &'static str) -> Result<Vec<T>> {
        match id {
            Some(id) => Ok(vec![self.get(id, entity)?]),
            None => Ok(self.all()),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    localities: Table<Locality>,
    sellers: Table<Seller>,
    buyers: Table<Buyer>,
    employees: Table<Employee>,
    warehouses: Table<Warehouse>,
    product_types: Table<ProductType>,
    sections: Table<Section>,
    products: Table<Product>,
    product_batches: Table<ProductBatch>,
    product_records: Table<ProductRecord>,
    purchase_orders: Table<PurchaseOrder>,
    inbound_orders: Table<InboundOrder>,
    carriers: Table<Carrier>,
}

/// Fails with `NotFound` for the referenced table when a foreign key dangles.
fn references(present: bool, entity: &'static str) -> Result<()> {
    if present {
        Ok(())
    } else {
        Err(StoreError::not_found(entity))
    }
}

/// Fails with `Referenced` when dependents still point at the row.
fn restrict(referenced: bool, entity: &'static str) -> Result<()> {
    if referenced {
        Err(StoreError::Referenced { entity })
    } else {
        Ok(())
    }
}

/// In-memory store implementing every repository.
///
/// Mirrors the relational schema: unique indices raise `Duplicated`, dangling
/// foreign keys raise `NotFound` for the referenced table, and deleting a
/// referenced row raises `Referenced`.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a store seeded with the default product types.
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for (name, description) in [
            ("Frozen", "Kept at or below -18 degrees Celsius"),
            ("Refrigerated", "Kept between 0 and 8 degrees Celsius"),
            ("Fresh", "Kept at controlled ambient temperature"),
        ] {
            tables.product_types.insert(ProductType {
                id: 0,
                name: name.to_string(),
                description: description.to_string(),
            });
        }
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Creates a store without any product types.
    pub fn empty() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    /// Adds a product type; used to seed fixtures.
    pub async fn insert_product_type(&self, product_type: ProductType) -> ProductType {
        self.tables.write().await.product_types.insert(product_type)
    }
}

#[async_trait]
impl LocalityRepository for InMemoryStore {
    async fn list_localities(&self) -> Result<Vec<Locality>> {
        Ok(self.tables.read().await.localities.all())
    }

    async fn find_locality(&self, id: Id) -> Result<Locality> {
        self.tables.read().await.localities.get(id, LOCALITY)
    }

    async fn save_locality(&self, locality: Locality) -> Result<Locality> {
        let mut tables = self.tables.write().await;
        tables
            .localities
            .insert_keyed(locality, LOCALITY, "localities_pkey")
    }

    async fn update_locality(&self, locality: &Locality) -> Result<()> {
        self.tables
            .write()
            .await
            .localities
            .replace(locality, LOCALITY)
    }

    async fn delete_locality(&self, id: Id) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.localities.get(id, LOCALITY)?;
        restrict(
            tables.sellers.any(|s| s.locality_id == id)
                || tables.carriers.any(|c| c.locality_id == id),
            LOCALITY,
        )?;
        tables.localities.remove(id, LOCALITY)
    }

    async fn locality_sellers_report(&self, id: Option<Id>) -> Result<Vec<LocalitySellersCount>> {
        let tables = self.tables.read().await;
        Ok(tables
            .localities
            .anchored(id, LOCALITY)?
            .into_iter()
            .map(|locality| LocalitySellersCount {
                sellers_count: tables.sellers.count(|s| s.locality_id == locality.id),
                locality_id: locality.id,
                locality_name: locality.locality_name,
                province_name: locality.province_name,
                country_name: locality.country_name,
            })
            .collect())
    }

    async fn locality_carries_report(
        &self,
        id: Option<Id>,
    ) -> Result<Vec<CarriesCountPerLocality>> {
        let tables = self.tables.read().await;
        Ok(tables
            .localities
            .anchored(id, LOCALITY)?
            .into_iter()
            .map(|locality| CarriesCountPerLocality {
                carries_count: tables.carriers.count(|c| c.locality_id == locality.id),
                locality_id: locality.id,
                locality_name: locality.locality_name,
            })
            .collect())
    }
}

#[async_trait]
impl SellerRepository for InMemoryStore {
    async fn list_sellers(&self) -> Result<Vec<Seller>> {
        Ok(self.tables.read().await.sellers.all())
    }

    async fn find_seller(&self, id: Id) -> Result<Seller> {
        self.tables.read().await.sellers.get(id, SELLER)
    }

    async fn find_seller_by_cid(&self, cid: i64) -> Result<Seller> {
        let tables = self.tables.read().await;
        tables.sellers.find(SELLER, |s| s.cid == cid)
    }

    async fn save_seller(&self, seller: Seller) -> Result<Seller> {
        let mut tables = self.tables.write().await;
        tables
            .sellers
            .ensure_unique(SELLER, "uq_sellers_cid", 0, |s| s.cid == seller.cid)?;
        references(tables.localities.contains(seller.locality_id), LOCALITY)?;
        Ok(tables.sellers.insert(seller))
    }

    async fn update_seller(&self, seller: &Seller) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.sellers.get(seller.id, SELLER)?;
        tables
            .sellers
            .ensure_unique(SELLER, "uq_sellers_cid", seller.id, |s| s.cid == seller.cid)?;
        references(tables.localities.contains(seller.locality_id), LOCALITY)?;
        tables.sellers.replace(seller, SELLER)
    }

    async fn delete_seller(&self, id: Id) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.sellers.get(id, SELLER)?;
        restrict(tables.products.any(|p| p.seller_id == id), SELLER)?;
        tables.sellers.remove(id, SELLER)
    }
}

#[async_trait]
impl BuyerRepository for InMemoryStore {
    async fn list_buyers(&self) -> Result<Vec<Buyer>> {
        Ok(self.tables.read().await.buyers.all())
    }

    async fn find_buyer(&self, id: Id) -> Result<Buyer> {
        self.tables.read().await.buyers.get(id, BUYER)
    }

    async fn find_buyer_by_card_number(&self, card_number_id: &str) -> Result<Buyer> {
        self.tables
            .read()
            .await
            .buyers
            .find(BUYER, |b| b.card_number_id == card_number_id)
    }

    async fn save_buyer(&self, buyer: Buyer) -> Result<Buyer> {
        let mut tables = self.tables.write().await;
        tables
            .buyers
            .ensure_unique(BUYER, "uq_buyers_card_number_id", 0, |b| {
                b.card_number_id == buyer.card_number_id
            })?;
        Ok(tables.buyers.insert(buyer))
    }

    async fn update_buyer(&self, buyer: &Buyer) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.buyers.get(buyer.id, BUYER)?;
        tables
            .buyers
            .ensure_unique(BUYER, "uq_buyers_card_number_id", buyer.id, |b| {
                b.card_number_id == buyer.card_number_id
            })?;
        tables.buyers.replace(buyer, BUYER)
    }

    async fn delete_buyer(&self, id: Id) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.buyers.get(id, BUYER)?;
        restrict(tables.purchase_orders.any(|po| po.buyer_id == id), BUYER)?;
        tables.buyers.remove(id, BUYER)
    }

    async fn purchase_orders_report(&self, id: Option<Id>) -> Result<Vec<PurchaseOrdersByBuyer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .buyers
            .anchored(id, BUYER)?
            .into_iter()
            .map(|buyer| PurchaseOrdersByBuyer {
                purchase_orders_count: tables.purchase_orders.count(|po| po.buyer_id == buyer.id),
                buyer_id: buyer.id,
                card_number_id: buyer.card_number_id,
                first_name: buyer.first_name,
                last_name: buyer.last_name,
            })
            .collect())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn list_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.tables.read().await.employees.all())
    }

    async fn find_employee(&self, id: Id) -> Result<Employee> {
        self.tables.read().await.employees.get(id, EMPLOYEE)
    }

    async fn find_employee_by_card_number(&self, card_number_id: &str) -> Result<Employee> {
        self.tables
            .read()
            .await
            .employees
            .find(EMPLOYEE, |e| e.card_number_id == card_number_id)
    }

    async fn save_employee(&self, employee: Employee) -> Result<Employee> {
        let mut tables = self.tables.write().await;
        tables
            .employees
            .ensure_unique(EMPLOYEE, "uq_employees_card_number_id", 0, |e| {
                e.card_number_id == employee.card_number_id
            })?;
        references(tables.warehouses.contains(employee.warehouse_id), WAREHOUSE)?;
        Ok(tables.employees.insert(employee))
    }

    async fn update_employee(&self, employee: &Employee) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.employees.get(employee.id, EMPLOYEE)?;
        tables.employees.ensure_unique(
            EMPLOYEE,
            "uq_employees_card_number_id",
            employee.id,
            |e| e.card_number_id == employee.card_number_id,
        )?;
        references(tables.warehouses.contains(employee.warehouse_id), WAREHOUSE)?;
        tables.employees.replace(employee, EMPLOYEE)
    }

    async fn delete_employee(&self, id: Id) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.employees.get(id, EMPLOYEE)?;
        restrict(tables.inbound_orders.any(|o| o.employee_id == id), EMPLOYEE)?;
        tables.employees.remove(id, EMPLOYEE)
    }

    async fn inbound_orders_report(
        &self,
        id: Option<Id>,
    ) -> Result<Vec<InboundOrdersPerEmployee>> {
        let tables = self.tables.read().await;
        Ok(tables
            .employees
            .anchored(id, EMPLOYEE)?
            .into_iter()
            .map(|employee| InboundOrdersPerEmployee {
                inbound_orders_count: tables
                    .inbound_orders
                    .count(|io| io.employee_id == employee.id),
                employee_id: employee.id,
                card_number_id: employee.card_number_id,
                first_name: employee.first_name,
                last_name: employee.last_name,
                warehouse_id: employee.warehouse_id,
            })
            .collect())
    }
}

#[async_trait]
impl WarehouseRepository for InMemoryStore {
    async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        Ok(self.tables.read().await.warehouses.all())
    }

    async fn find_warehouse(&self, id: Id) -> Result<Warehouse> {
        self.tables.read().await.warehouses.get(id, WAREHOUSE)
    }

    async fn find_warehouse_by_code(&self, warehouse_code: &str) -> Result<Warehouse> {
        self.tables
            .read()
            .await
            .warehouses
            .find(WAREHOUSE, |w| w.warehouse_code == warehouse_code)
    }

    async fn save_warehouse(&self, warehouse: Warehouse) -> Result<Warehouse> {
        let mut tables = self.tables.write().await;
        tables
            .warehouses
            .ensure_unique(WAREHOUSE, "uq_warehouses_warehouse_code", 0, |w| {
                w.warehouse_code == warehouse.warehouse_code
            })?;
        Ok(tables.warehouses.insert(warehouse))
    }

    async fn update_warehouse(&self, warehouse: &Warehouse) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.warehouses.get(warehouse.id, WAREHOUSE)?;
        tables.warehouses.ensure_unique(
            WAREHOUSE,
            "uq_warehouses_warehouse_code",
            warehouse.id,
            |w| w.warehouse_code == warehouse.warehouse_code,
        )?;
        tables.warehouses.replace(warehouse, WAREHOUSE)
    }

    async fn delete_warehouse(&self, id: Id) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.warehouses.get(id, WAREHOUSE)?;
        restrict(
            tables.employees.any(|e| e.warehouse_id == id)
                || tables.sections.any(|s| s.warehouse_id == id)
                || tables.inbound_orders.any(|io| io.warehouse_id == id),
            WAREHOUSE,
        )?;
        tables.warehouses.remove(id, WAREHOUSE)
    }
}

#[async_trait]
impl ProductTypeRepository for InMemoryStore {
    async fn list_product_types(&self) -> Result<Vec<ProductType>> {
        Ok(self.tables.read().await.product_types.all())
    }

    async fn find_product_type(&self, id: Id) -> Result<ProductType> {
        let tables = self.tables.read().await;
        tables.product_types.get(id, PRODUCT_TYPE)
    }
}

#[async_trait]
impl SectionRepository for InMemoryStore {
    async fn list_sections(&self) -> Result<Vec<Section>> {
        Ok(self.tables.read().await.sections.all())
    }

    async fn find_section(&self, id: Id) -> Result<Section> {
        self.tables.read().await.sections.get(id, SECTION)
    }

    async fn find_section_by_number(&self, section_number: i64) -> Result<Section> {
        self.tables
            .read()
            .await
            .sections
            .find(SECTION, |s| s.section_number == section_number)
    }

    async fn save_section(&self, section: Section) -> Result<Section> {
        let mut tables = self.tables.write().await;
        tables
            .sections
            .ensure_unique(SECTION, "uq_sections_section_number", 0, |s| {
                s.section_number == section.section_number
            })?;
        references(tables.warehouses.contains(section.warehouse_id), WAREHOUSE)?;
        references(
            tables.product_types.contains(section.product_type_id),
            PRODUCT_TYPE,
        )?;
        Ok(tables.sections.insert(section))
    }

    async fn update_section(&self, section: &Section) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.sections.get(section.id, SECTION)?;
        tables
            .sections
            .ensure_unique(SECTION, "uq_sections_section_number", section.id, |s| {
                s.section_number == section.section_number
            })?;
        references(tables.warehouses.contains(section.warehouse_id), WAREHOUSE)?;
        references(
            tables.product_types.contains(section.product_type_id),
            PRODUCT_TYPE,
        )?;
        tables.sections.replace(section, SECTION)
    }

    async fn delete_section(&self, id: Id) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.sections.get(id, SECTION)?;
        restrict(tables.product_batches.any(|b| b.section_id == id), SECTION)?;
        tables.sections.remove(id, SECTION)
    }

    async fn section_products_report(&self, id: Option<Id>) -> Result<Vec<ReportProduct>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sections
            .anchored(id, SECTION)?
            .into_iter()
            .map(|s| ReportProduct {
                products_count: tables.product_batches.count(|b| b.section_id == s.id),
                section_id: s.id,
                section_number: s.section_number,
            })
            .collect())
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.tables.read().await.products.all())
    }

    async fn find_product(&self, id: Id) -> Result<Product> {
        self.tables.read().await.products.get(id, PRODUCT)
    }

    async fn find_product_by_code(&self, product_code: &str) -> Result<Product> {
        self.tables
            .read()
            .await
            .products
            .find(PRODUCT, |p| p.product_code == product_code)
    }

    async fn save_product(&self, product: Product) -> Result<Product> {
        let mut tables = self.tables.write().await;
        tables
            .products
            .ensure_unique(PRODUCT, "uq_products_product_code", 0, |p| {
                p.product_code == product.product_code
            })?;
        references(tables.sellers.contains(product.seller_id), SELLER)?;
        references(
            tables.product_types.contains(product.product_type_id),
            PRODUCT_TYPE,
        )?;
        Ok(tables.products.insert(product))
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.products.get(product.id, PRODUCT)?;
        tables
            .products
            .ensure_unique(PRODUCT, "uq_products_product_code", product.id, |p| {
                p.product_code == product.product_code
            })?;
        references(tables.sellers.contains(product.seller_id), SELLER)?;
        references(
            tables.product_types.contains(product.product_type_id),
            PRODUCT_TYPE,
        )?;
        tables.products.replace(product, PRODUCT)
    }

    async fn delete_product(&self, id: Id) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.products.get(id, PRODUCT)?;
        restrict(
            tables.product_batches.any(|b| b.product_id == id)
                || tables.product_records.any(|r| r.product_id == id),
            PRODUCT,
        )?;
        tables.products.remove(id, PRODUCT)
    }

    async fn product_records_report(&self, id: Option<Id>) -> Result<Vec<ProductRecordsReport>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .anchored(id, PRODUCT)?
            .into_iter()
            .map(|p| ProductRecordsReport {
                records_count: tables.product_records.count(|r| r.product_id == p.id),
                product_id: p.id,
                description: p.description,
            })
            .collect())
    }
}

#[async_trait]
impl ProductBatchRepository for InMemoryStore {
    async fn list_product_batches(&self) -> Result<Vec<ProductBatch>> {
        Ok(self.tables.read().await.product_batches.all())
    }

    async fn find_product_batch(&self, id: Id) -> Result<ProductBatch> {
        let tables = self.tables.read().await;
        tables.product_batches.get(id, PRODUCT_BATCH)
    }

    async fn find_product_batch_by_number(&self, batch_number: i64) -> Result<ProductBatch> {
        self.tables
            .read()
            .await
            .product_batches
            .find(PRODUCT_BATCH, |b| b.batch_number == batch_number)
    }

    async fn save_product_batch(&self, batch: ProductBatch) -> Result<ProductBatch> {
        let mut tables = self.tables.write().await;
        tables.product_batches.ensure_unique(
            PRODUCT_BATCH,
            "uq_product_batches_batch_number",
            0,
            |b| b.batch_number == batch.batch_number,
        )?;
        references(tables.products.contains(batch.product_id), PRODUCT)?;
        references(tables.sections.contains(batch.section_id), SECTION)?;
        Ok(tables.product_batches.insert(batch))
    }

    async fn update_product_batch(&self, batch: &ProductBatch) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.product_batches.get(batch.id, PRODUCT_BATCH)?;
        tables.product_batches.ensure_unique(
            PRODUCT_BATCH,
            "uq_product_batches_batch_number",
            batch.id,
            |b| b.batch_number == batch.batch_number,
        )?;
        references(tables.products.contains(batch.product_id), PRODUCT)?;
        references(tables.sections.contains(batch.section_id), SECTION)?;
        tables.product_batches.replace(batch, PRODUCT_BATCH)
    }

    async fn delete_product_batch(&self, id: Id) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.product_batches.get(id, PRODUCT_BATCH)?;
        restrict(
            tables.inbound_orders.any(|io| io.product_batch_id == id),
            PRODUCT_BATCH,
        )?;
        tables.product_batches.remove(id, PRODUCT_BATCH)
    }
}

#[async_trait]
impl ProductRecordRepository for InMemoryStore {
    async fn list_product_records(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.tables.read().await.product_records.all())
    }

    async fn find_product_record(&self, id: Id) -> Result<ProductRecord> {
        let tables = self.tables.read().await;
        tables.product_records.get(id, PRODUCT_RECORD)
    }

    async fn save_product_record(&self, record: ProductRecord) -> Result<ProductRecord> {
        let mut tables = self.tables.write().await;
        references(tables.products.contains(record.product_id), PRODUCT)?;
        Ok(tables.product_records.insert(record))
    }

    async fn update_product_record(&self, record: &ProductRecord) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.product_records.get(record.id, PRODUCT_RECORD)?;
        references(tables.products.contains(record.product_id), PRODUCT)?;
        tables.product_records.replace(record, PRODUCT_RECORD)
    }

    async fn delete_product_record(&self, id: Id) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.product_records.get(id, PRODUCT_RECORD)?;
        restrict(
            tables.purchase_orders.any(|po| po.product_record_id == id),
            PRODUCT_RECORD,
        )?;
        tables.product_records.remove(id, PRODUCT_RECORD)
    }
}

#[async_trait]
impl PurchaseOrderRepository for InMemoryStore {
    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>> {
        Ok(self.tables.read().await.purchase_orders.all())
    }

    async fn find_purchase_order(&self, id: Id) -> Result<PurchaseOrder> {
        let tables = self.tables.read().await;
        tables.purchase_orders.get(id, PURCHASE_ORDER)
    }

    async fn find_purchase_order_by_number(&self, order_number: &str) -> Result<PurchaseOrder> {
        self.tables
            .read()
            .await
            .purchase_orders
            .find(PURCHASE_ORDER, |po| po.order_number == order_number)
    }

    async fn save_purchase_order(&self, order: PurchaseOrder) -> Result<PurchaseOrder> {
        let mut tables = self.tables.write().await;
        tables.purchase_orders.ensure_unique(
            PURCHASE_ORDER,
            "uq_purchase_orders_order_number",
            0,
            |po| po.order_number == order.order_number,
        )?;
        references(tables.buyers.contains(order.buyer_id), BUYER)?;
        references(
            tables.product_records.contains(order.product_record_id),
            PRODUCT_RECORD,
        )?;
        Ok(tables.purchase_orders.insert(order))
    }

    async fn update_purchase_order(&self, order: &PurchaseOrder) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.purchase_orders.get(order.id, PURCHASE_ORDER)?;
        tables.purchase_orders.ensure_unique(
            PURCHASE_ORDER,
            "uq_purchase_orders_order_number",
            order.id,
            |po| po.order_number == order.order_number,
        )?;
        references(tables.buyers.contains(order.buyer_id), BUYER)?;
        references(
            tables.product_records.contains(order.product_record_id),
            PRODUCT_RECORD,
        )?;
        tables.purchase_orders.replace(order, PURCHASE_ORDER)
    }

    async fn delete_purchase_order(&self, id: Id) -> Result<()> {
        self.tables
            .write()
            .await
            .purchase_orders
            .remove(id, PURCHASE_ORDER)
    }
}

#[async_trait]
impl InboundOrderRepository for InMemoryStore {
    async fn list_inbound_orders(&self) -> Result<Vec<InboundOrder>> {
        Ok(self.tables.read().await.inbound_orders.all())
    }

    async fn find_inbound_order(&self, id: Id) -> Result<InboundOrder> {
        let tables = self.tables.read().await;
        tables.inbound_orders.get(id, INBOUND_ORDER)
    }

    async fn find_inbound_order_by_number(&self, order_number: &str) -> Result<InboundOrder> {
        self.tables
            .read()
            .await
            .inbound_orders
            .find(INBOUND_ORDER, |io| io.order_number == order_number)
    }

    async fn save_inbound_order(&self, order: InboundOrder) -> Result<InboundOrder> {
        let mut tables = self.tables.write().await;
        tables.inbound_orders.ensure_unique(
            INBOUND_ORDER,
            "uq_inbound_orders_order_number",
            0,
            |io| io.order_number == order.order_number,
        )?;
        references(tables.employees.contains(order.employee_id), EMPLOYEE)?;
        references(
            tables.product_batches.contains(order.product_batch_id),
            PRODUCT_BATCH,
        )?;
        references(tables.warehouses.contains(order.warehouse_id), WAREHOUSE)?;
        Ok(tables.inbound_orders.insert(order))
    }

    async fn update_inbound_order(&self, order: &InboundOrder) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.inbound_orders.get(order.id, INBOUND_ORDER)?;
        tables.inbound_orders.ensure_unique(
            INBOUND_ORDER,
            "uq_inbound_orders_order_number",
            order.id,
            |io| io.order_number == order.order_number,
        )?;
        references(tables.employees.contains(order.employee_id), EMPLOYEE)?;
        references(
            tables.product_batches.contains(order.product_batch_id),
            PRODUCT_BATCH,
        )?;
        references(tables.warehouses.contains(order.warehouse_id), WAREHOUSE)?;
        tables.inbound_orders.replace(order, INBOUND_ORDER)
    }

    async fn delete_inbound_order(&self, id: Id) -> Result<()> {
        self.tables
            .write()
            .await
            .inbound_orders
            .remove(id, INBOUND_ORDER)
    }
}

#[async_trait]
impl CarrierRepository for InMemoryStore {
    async fn list_carriers(&self) -> Result<Vec<Carrier>> {
        Ok(self.tables.read().await.carriers.all())
    }

    async fn find_carrier(&self, id: Id) -> Result<Carrier> {
        self.tables.read().await.carriers.get(id, CARRIER)
    }

    async fn find_carrier_by_cid(&self, cid: &str) -> Result<Carrier> {
        let tables = self.tables.read().await;
        tables.carriers.find(CARRIER, |c| c.cid == cid)
    }

    async fn save_carrier(&self, carrier: Carrier) -> Result<Carrier> {
        let mut tables = self.tables.write().await;
        tables
            .carriers
            .ensure_unique(CARRIER, "uq_carriers_cid", 0, |c| c.cid == carrier.cid)?;
        references(tables.localities.contains(carrier.locality_id), LOCALITY)?;
        Ok(tables.carriers.insert(carrier))
    }

    async fn update_carrier(&self, carrier: &Carrier) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.carriers.get(carrier.id, CARRIER)?;
        tables
            .carriers
            .ensure_unique(CARRIER, "uq_carriers_cid", carrier.id, |c| c.cid == carrier.cid)?;
        references(tables.localities.contains(carrier.locality_id), LOCALITY)?;
        tables.carriers.replace(carrier, CARRIER)
    }

    async fn delete_carrier(&self, id: Id) -> Result<()> {
        self.tables.write().await.carriers.remove(id, CARRIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locality(id: Id) -> Locality {
        Locality {
            id,
            locality_name: "Campinas".to_string(),
            province_name: "SP".to_string(),
            country_name: "Brasil".to_string(),
        }
    }

    fn seller(cid: i64, locality_id: Id) -> Seller {
        Seller {
            id: 0,
            cid,
            company_name: "Frutas SA".to_string(),
            address: "Rua 1".to_string(),
            telephone: "11 91332-3232".to_string(),
            locality_id,
        }
    }

    #[tokio::test]
    async fn seeds_product_types() {
        let store = InMemoryStore::new();
        let types = store.list_product_types().await.unwrap();
        assert_eq!(types.len(), 3);
        assert_eq!(store.find_product_type(1).await.unwrap().name, "Frozen");
        assert!(InMemoryStore::empty()
            .list_product_types()
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        store.save_locality(locality(10)).await.unwrap();

        let first = store.save_seller(seller(1, 10)).await.unwrap();
        let second = store.save_seller(seller(2, 10)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.find_seller_by_cid(2).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn unique_index_raises_duplicated() {
        let store = InMemoryStore::new();
        store.save_locality(locality(1)).await.unwrap();
        store.save_seller(seller(7, 1)).await.unwrap();

        let err = store.save_seller(seller(7, 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicated { entity: "seller", .. }));

        let err = store.save_locality(locality(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicated { entity: "locality", .. }));
    }

    #[tokio::test]
    async fn update_may_keep_its_own_key() {
        let store = InMemoryStore::new();
        store.save_locality(locality(1)).await.unwrap();
        let mut saved = store.save_seller(seller(7, 1)).await.unwrap();
        saved.company_name = "Renamed".to_string();

        store.update_seller(&saved).await.unwrap();
        let found = store.find_seller(saved.id).await.unwrap();
        assert_eq!(found.company_name, "Renamed");
    }

    #[tokio::test]
    async fn dangling_foreign_key_names_referenced_table() {
        let store = InMemoryStore::new();
        let err = store.save_seller(seller(1, 99)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "locality" }));
    }

    #[tokio::test]
    async fn delete_is_restricted_while_referenced() {
        let store = InMemoryStore::new();
        store.save_locality(locality(1)).await.unwrap();
        let saved = store.save_seller(seller(1, 1)).await.unwrap();

        let err = store.delete_locality(1).await.unwrap_err();
        assert!(matches!(err, StoreError::Referenced { entity: "locality" }));

        store.delete_seller(saved.id).await.unwrap();
        store.delete_locality(1).await.unwrap();
        assert!(store.delete_locality(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn reports_keep_zero_counts_and_check_anchor() {
        let store = InMemoryStore::new();
        store.save_locality(locality(1)).await.unwrap();
        store.save_locality(locality(2)).await.unwrap();
        store.save_seller(seller(1, 1)).await.unwrap();
        store.save_seller(seller(2, 1)).await.unwrap();

        let all = store.locality_sellers_report(None).await.unwrap();
        let counts: Vec<_> = all
            .iter()
            .map(|r| (r.locality_id, r.sellers_count))
            .collect();
        assert_eq!(counts, vec![(1, 2), (2, 0)]);

        let one = store.locality_carries_report(Some(2)).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].carries_count, 0);

        let err = store.locality_sellers_report(Some(3)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
