//! Shared application state.

use domain::{
    BuyerService, CarrierService, EmployeeService, InboundOrderService, LocalityService,
    ProductBatchService, ProductRecordService, ProductService, PurchaseOrderService,
    SectionService, SellerService, WarehouseService,
};
use store::Store;

/// One service per aggregate, all backed by the same store.
pub struct AppState<S> {
    pub sellers: SellerService<S>,
    pub localities: LocalityService<S>,
    pub carriers: CarrierService<S>,
    pub buyers: BuyerService<S>,
    pub employees: EmployeeService<S>,
    pub warehouses: WarehouseService<S>,
    pub sections: SectionService<S>,
    pub products: ProductService<S>,
    pub product_batches: ProductBatchService<S>,
    pub product_records: ProductRecordService<S>,
    pub purchase_orders: PurchaseOrderService<S>,
    pub inbound_orders: InboundOrderService<S>,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            sellers: SellerService::new(store.clone()),
            localities: LocalityService::new(store.clone()),
            carriers: CarrierService::new(store.clone()),
            buyers: BuyerService::new(store.clone()),
            employees: EmployeeService::new(store.clone()),
            warehouses: WarehouseService::new(store.clone()),
            sections: SectionService::new(store.clone()),
            products: ProductService::new(store.clone()),
            product_batches: ProductBatchService::new(store.clone()),
            product_records: ProductRecordService::new(store.clone()),
            purchase_orders: PurchaseOrderService::new(store.clone()),
            inbound_orders: InboundOrderService::new(store),
        }
    }
}
