//! Read-only projections that join an anchor entity with counts of its dependents.

use serde::{Deserialize, Serialize};

use crate::types::Id;

/// Purchase orders placed by one buyer. The buyer id goes over the wire as `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrdersByBuyer {
    #[serde(rename = "id")]
    pub buyer_id: Id,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub purchase_orders_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundOrdersPerEmployee {
    pub employee_id: Id,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: Id,
    pub inbound_orders_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriesCountPerLocality {
    pub locality_id: Id,
    pub locality_name: String,
    pub carries_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalitySellersCount {
    pub locality_id: Id,
    pub locality_name: String,
    pub province_name: String,
    pub country_name: String,
    pub sellers_count: i64,
}

/// Product batches stored in a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportProduct {
    pub section_id: Id,
    pub section_number: i64,
    pub products_count: i64,
}

/// Price records kept for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecordsReport {
    pub product_id: Id,
    pub description: String,
    pub records_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buyer_report_exposes_id_field() {
        let row = PurchaseOrdersByBuyer {
            buyer_id: 3,
            card_number_id: "C-3".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            purchase_orders_count: 0,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 3);
        assert!(json.get("buyer_id").is_none());
    }
}
