pub mod buyers;
pub mod carriers;
pub mod employees;
pub mod health;
pub mod inbound_orders;
pub mod localities;
pub mod metrics;
pub mod product_batches;
pub mod product_records;
pub mod products;
pub mod purchase_orders;
pub mod sections;
pub mod sellers;
pub mod warehouses;
