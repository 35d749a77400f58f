//! Table names as they appear in error messages.

pub const LOCALITY: &str = "locality";
pub const SELLER: &str = "seller";
pub const BUYER: &str = "buyer";
pub const EMPLOYEE: &str = "employee";
pub const WAREHOUSE: &str = "warehouse";
pub const PRODUCT_TYPE: &str = "product type";
pub const SECTION: &str = "section";
pub const PRODUCT: &str = "product";
pub const PRODUCT_BATCH: &str = "product batch";
pub const PRODUCT_RECORD: &str = "product record";
pub const PURCHASE_ORDER: &str = "purchase order";
pub const INBOUND_ORDER: &str = "inbound order";
pub const CARRIER: &str = "carrier";
