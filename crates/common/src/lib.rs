//! Shared model for the fresh-products inventory.
//!
//! This crate holds everything the other layers agree on without doing I/O:
//! - entity records and their field-level `Validate` rules
//! - patch types used for both creation and partial updates
//! - report projections returned by the aggregate queries
//! - the validator helpers behind the field rules

pub mod model;
pub mod report;
pub mod types;
pub mod validation;

pub use model::*;
pub use report::{
    CarriesCountPerLocality, InboundOrdersPerEmployee, LocalitySellersCount, ProductRecordsReport,
    PurchaseOrdersByBuyer, ReportProduct,
};
pub use types::{Cause, Id, InputError, Validate};
pub use validation::Causes;
