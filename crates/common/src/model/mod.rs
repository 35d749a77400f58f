//! Entity records, one module per aggregate.

mod buyer;
mod carrier;
mod employee;
mod inbound_order;
mod locality;
mod product;
mod product_batch;
mod product_record;
mod product_type;
mod purchase_order;
mod section;
mod seller;
mod warehouse;

pub use buyer::{Buyer, BuyerPatch};
pub use carrier::{Carrier, CarrierPatch};
pub use employee::{Employee, EmployeePatch};
pub use inbound_order::{InboundOrder, InboundOrderPatch};
pub use locality::{Locality, LocalityPatch};
pub use product::{Product, ProductPatch};
pub use product_batch::{ProductBatch, ProductBatchPatch};
pub use product_record::{ProductRecord, ProductRecordPatch};
pub use product_type::ProductType;
pub use purchase_order::{ORDER_DATE_FORMAT, PurchaseOrder, PurchaseOrderPatch, parse_order_date};
pub use section::{Section, SectionPatch};
pub use seller::{Seller, SellerPatch};
pub use warehouse::{Warehouse, WarehousePatch};
