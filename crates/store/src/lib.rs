//! Persistence layer for the inventory.
//!
//! Every aggregate has a repository trait in [`repository`]. Two stores
//! implement all of them: [`InMemoryStore`] for tests and local runs, and
//! [`PostgresStore`] backed by sqlx. Storage failures reach callers only as
//! [`StoreError`] variants.

pub mod entity;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use repository::{
    BuyerRepository, CarrierRepository, EmployeeRepository, InboundOrderRepository,
    LocalityRepository, ProductBatchRepository, ProductRecordRepository, ProductRepository,
    ProductTypeRepository, PurchaseOrderRepository, SectionRepository, SellerRepository, Store,
    WarehouseRepository,
};
