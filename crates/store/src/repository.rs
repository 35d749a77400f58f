//! Repository contracts, one per aggregate.
//!
//! Method names carry the aggregate so that a single store type can implement
//! every trait without call-site ambiguity. Natural-key lookups and `find_*`
//! by id return [`StoreError::NotFound`](crate::StoreError::NotFound) when
//! nothing matches; writes return `Duplicated` when a unique constraint trips.
//! Report queries take an optional anchor id and fail with `NotFound` when the
//! anchor row does not exist.

use async_trait::async_trait;
use common::{
    Buyer, Carrier, CarriesCountPerLocality, Employee, Id, InboundOrder, InboundOrdersPerEmployee,
    Locality, LocalitySellersCount, Product, ProductBatch, ProductRecord, ProductRecordsReport,
    ProductType, PurchaseOrder, PurchaseOrdersByBuyer, ReportProduct, Section, Seller, Warehouse,
};

use crate::Result;

#[async_trait]
pub trait LocalityRepository: Send + Sync {
    async fn list_localities(&self) -> Result<Vec<Locality>>;

    async fn find_locality(&self, id: Id) -> Result<Locality>;

    /// Stores a locality under its client-supplied id.
    async fn save_locality(&self, locality: Locality) -> Result<Locality>;

    async fn update_locality(&self, locality: &Locality) -> Result<()>;

    async fn delete_locality(&self, id: Id) -> Result<()>;

    /// Sellers registered per locality.
    async fn locality_sellers_report(&self, id: Option<Id>) -> Result<Vec<LocalitySellersCount>>;

    /// Carriers registered per locality.
    async fn locality_carries_report(&self, id: Option<Id>)
    -> Result<Vec<CarriesCountPerLocality>>;
}

#[async_trait]
pub trait SellerRepository: Send + Sync {
    async fn list_sellers(&self) -> Result<Vec<Seller>>;

    async fn find_seller(&self, id: Id) -> Result<Seller>;

    async fn find_seller_by_cid(&self, cid: i64) -> Result<Seller>;

    /// Inserts the seller and returns it with its assigned id.
    async fn save_seller(&self, seller: Seller) -> Result<Seller>;

    async fn update_seller(&self, seller: &Seller) -> Result<()>;

    async fn delete_seller(&self, id: Id) -> Result<()>;
}

#[async_trait]
pub trait BuyerRepository: Send + Sync {
    async fn list_buyers(&self) -> Result<Vec<Buyer>>;

    async fn find_buyer(&self, id: Id) -> Result<Buyer>;

    async fn find_buyer_by_card_number(&self, card_number_id: &str) -> Result<Buyer>;

    async fn save_buyer(&self, buyer: Buyer) -> Result<Buyer>;

    async fn update_buyer(&self, buyer: &Buyer) -> Result<()>;

    async fn delete_buyer(&self, id: Id) -> Result<()>;

    /// Purchase orders placed per buyer; buyers without orders report zero.
    async fn purchase_orders_report(&self, id: Option<Id>) -> Result<Vec<PurchaseOrdersByBuyer>>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<Employee>>;

    async fn find_employee(&self, id: Id) -> Result<Employee>;

    async fn find_employee_by_card_number(&self, card_number_id: &str) -> Result<Employee>;

    async fn save_employee(&self, employee: Employee) -> Result<Employee>;

    async fn update_employee(&self, employee: &Employee) -> Result<()>;

    async fn delete_employee(&self, id: Id) -> Result<()>;

    /// Inbound orders registered per employee.
    async fn inbound_orders_report(&self, id: Option<Id>)
    -> Result<Vec<InboundOrdersPerEmployee>>;
}

#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn list_warehouses(&self) -> Result<Vec<Warehouse>>;

    async fn find_warehouse(&self, id: Id) -> Result<Warehouse>;

    async fn find_warehouse_by_code(&self, warehouse_code: &str) -> Result<Warehouse>;

    async fn save_warehouse(&self, warehouse: Warehouse) -> Result<Warehouse>;

    async fn update_warehouse(&self, warehouse: &Warehouse) -> Result<()>;

    async fn delete_warehouse(&self, id: Id) -> Result<()>;
}

/// Product types are seeded with the schema and never written through the API.
#[async_trait]
pub trait ProductTypeRepository: Send + Sync {
    async fn list_product_types(&self) -> Result<Vec<ProductType>>;

    async fn find_product_type(&self, id: Id) -> Result<ProductType>;
}

#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn list_sections(&self) -> Result<Vec<Section>>;

    async fn find_section(&self, id: Id) -> Result<Section>;

    async fn find_section_by_number(&self, section_number: i64) -> Result<Section>;

    async fn save_section(&self, section: Section) -> Result<Section>;

    async fn update_section(&self, section: &Section) -> Result<()>;

    async fn delete_section(&self, id: Id) -> Result<()>;

    /// Product batches stored per section.
    async fn section_products_report(&self, id: Option<Id>) -> Result<Vec<ReportProduct>>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn find_product(&self, id: Id) -> Result<Product>;

    async fn find_product_by_code(&self, product_code: &str) -> Result<Product>;

    async fn save_product(&self, product: Product) -> Result<Product>;

    async fn update_product(&self, product: &Product) -> Result<()>;

    async fn delete_product(&self, id: Id) -> Result<()>;

    /// Price records kept per product.
    async fn product_records_report(&self, id: Option<Id>) -> Result<Vec<ProductRecordsReport>>;
}

#[async_trait]
pub trait ProductBatchRepository: Send + Sync {
    async fn list_product_batches(&self) -> Result<Vec<ProductBatch>>;

    async fn find_product_batch(&self, id: Id) -> Result<ProductBatch>;

    async fn find_product_batch_by_number(&self, batch_number: i64) -> Result<ProductBatch>;

    async fn save_product_batch(&self, batch: ProductBatch) -> Result<ProductBatch>;

    async fn update_product_batch(&self, batch: &ProductBatch) -> Result<()>;

    async fn delete_product_batch(&self, id: Id) -> Result<()>;
}

#[async_trait]
pub trait ProductRecordRepository: Send + Sync {
    async fn list_product_records(&self) -> Result<Vec<ProductRecord>>;

    async fn find_product_record(&self, id: Id) -> Result<ProductRecord>;

    async fn save_product_record(&self, record: ProductRecord) -> Result<ProductRecord>;

    async fn update_product_record(&self, record: &ProductRecord) -> Result<()>;

    async fn delete_product_record(&self, id: Id) -> Result<()>;
}

#[async_trait]
pub trait PurchaseOrderRepository: Send + Sync {
    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>>;

    async fn find_purchase_order(&self, id: Id) -> Result<PurchaseOrder>;

    async fn find_purchase_order_by_number(&self, order_number: &str) -> Result<PurchaseOrder>;

    async fn save_purchase_order(&self, order: PurchaseOrder) -> Result<PurchaseOrder>;

    async fn update_purchase_order(&self, order: &PurchaseOrder) -> Result<()>;

    async fn delete_purchase_order(&self, id: Id) -> Result<()>;
}

#[async_trait]
pub trait InboundOrderRepository: Send + Sync {
    async fn list_inbound_orders(&self) -> Result<Vec<InboundOrder>>;

    async fn find_inbound_order(&self, id: Id) -> Result<InboundOrder>;

    async fn find_inbound_order_by_number(&self, order_number: &str) -> Result<InboundOrder>;

    async fn save_inbound_order(&self, order: InboundOrder) -> Result<InboundOrder>;

    async fn update_inbound_order(&self, order: &InboundOrder) -> Result<()>;

    async fn delete_inbound_order(&self, id: Id) -> Result<()>;
}

#[async_trait]
pub trait CarrierRepository: Send + Sync {
    async fn list_carriers(&self) -> Result<Vec<Carrier>>;

    async fn find_carrier(&self, id: Id) -> Result<Carrier>;

    async fn find_carrier_by_cid(&self, cid: &str) -> Result<Carrier>;

    async fn save_carrier(&self, carrier: Carrier) -> Result<Carrier>;

    async fn update_carrier(&self, carrier: &Carrier) -> Result<()>;

    async fn delete_carrier(&self, id: Id) -> Result<()>;
}

/// A store that serves every aggregate.
pub trait Store:
    LocalityRepository
    + SellerRepository
    + BuyerRepository
    + EmployeeRepository
    + WarehouseRepository
    + ProductTypeRepository
    + SectionRepository
    + ProductRepository
    + ProductBatchRepository
    + ProductRecordRepository
    + PurchaseOrderRepository
    + InboundOrderRepository
    + CarrierRepository
    + Clone
    + 'static
{
}

impl<T> Store for T where
    T: LocalityRepository
        + SellerRepository
        + BuyerRepository
        + EmployeeRepository
        + WarehouseRepository
        + ProductTypeRepository
        + SectionRepository
        + ProductRepository
        + ProductBatchRepository
        + ProductRecordRepository
        + PurchaseOrderRepository
        + InboundOrderRepository
        + CarrierRepository
        + Clone
        + 'static
{
}
