//! Domain layer for the inventory service.
//!
//! One service per aggregate. Every write follows the same sequence, and the
//! first failing step decides the error:
//! 1. field validation (`Validation`)
//! 2. natural-key uniqueness (`Conflict`)
//! 3. referenced rows exist, in a fixed order per aggregate (`NotFound`)
//! 4. the repository write, where a late `Duplicated` is still a `Conflict`

pub mod buyer;
pub mod carrier;
pub mod employee;
pub mod error;
pub mod inbound_order;
pub mod locality;
pub mod product;
pub mod product_batch;
pub mod product_record;
mod protocol;
pub mod purchase_order;
pub mod section;
pub mod seller;
pub mod warehouse;

pub use buyer::BuyerService;
pub use carrier::CarrierService;
pub use employee::EmployeeService;
pub use error::{DomainError, INVALID_DATA, Result};
pub use inbound_order::InboundOrderService;
pub use locality::LocalityService;
pub use product::ProductService;
pub use product_batch::ProductBatchService;
pub use product_record::ProductRecordService;
pub use purchase_order::PurchaseOrderService;
pub use section::SectionService;
pub use seller::SellerService;
pub use warehouse::WarehouseService;
