use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// Wire format of order dates: a naive calendar date.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an order date, rejecting anything but `YYYY-MM-DD`.
pub fn parse_order_date(value: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(value, ORDER_DATE_FORMAT)
        .map_err(|_| InputError::malformed("order_date", "invalid date format"))
}

/// A buyer's order against a product record. `order_number` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Id,
    pub order_number: String,
    pub order_date: NaiveDate,
    pub tracking_code: String,
    pub buyer_id: Id,
    pub product_record_id: Id,
}

impl Validate for PurchaseOrder {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .text("order_number", &self.order_number)
            .text("tracking_code", &self.tracking_code);
        causes.into_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PurchaseOrderPatch {
    pub order_number: Option<String>,
    pub order_date: Option<String>,
    pub tracking_code: Option<String>,
    pub buyer_id: Option<Id>,
    pub product_record_id: Option<Id>,
}

impl PurchaseOrderPatch {
    /// A malformed date is reported even when other fields are missing.
    pub fn into_new(self) -> Result<PurchaseOrder, InputError> {
        let order_date = self
            .order_date
            .as_deref()
            .map(parse_order_date)
            .transpose()?;
        match (
            self.order_number,
            order_date,
            self.tracking_code,
            self.buyer_id,
            self.product_record_id,
        ) {
            (
                Some(order_number),
                Some(order_date),
                Some(tracking_code),
                Some(buyer_id),
                Some(product_record_id),
            ) => Ok(PurchaseOrder {
                id: 0,
                order_number,
                order_date,
                tracking_code,
                buyer_id,
                product_record_id,
            }),
            (order_number, order_date, tracking_code, buyer_id, product_record_id) => {
                Err(InputError::missing(&[
                    ("order_number", order_number.is_none()),
                    ("order_date", order_date.is_none()),
                    ("tracking_code", tracking_code.is_none()),
                    ("buyer_id", buyer_id.is_none()),
                    ("product_record_id", product_record_id.is_none()),
                ]))
            }
        }
    }

    pub fn apply(self, order: &mut PurchaseOrder) -> Result<(), InputError> {
        if let Some(order_date) = self.order_date {
            order.order_date = parse_order_date(&order_date)?;
        }
        if let Some(order_number) = self.order_number {
            order.order_number = order_number;
        }
        if let Some(tracking_code) = self.tracking_code {
            order.tracking_code = tracking_code;
        }
        if let Some(buyer_id) = self.buyer_id {
            order.buyer_id = buyer_id;
        }
        if let Some(product_record_id) = self.product_record_id {
            order.product_record_id = product_record_id;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_lists_all_fields() {
        let err = PurchaseOrderPatch::default().into_new().unwrap_err();
        let fields: Vec<_> = err.causes().iter().map(|c| c.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "order_number",
                "order_date",
                "tracking_code",
                "buyer_id",
                "product_record_id"
            ]
        );
        assert!(matches!(err, InputError::Missing(_)));
    }

    #[test]
    fn trailing_garbage_in_date_is_malformed() {
        let err = PurchaseOrderPatch {
            order_number: Some("PO-1".to_string()),
            order_date: Some("2023-10-05invalid".to_string()),
            tracking_code: Some("TRK".to_string()),
            buyer_id: Some(1),
            product_record_id: Some(1),
        }
        .into_new()
        .unwrap_err();
        assert_eq!(
            err,
            InputError::Malformed(vec![Cause::new("order_date", "invalid date format")])
        );
    }

    #[test]
    fn malformed_date_wins_over_missing_fields() {
        let err = PurchaseOrderPatch {
            order_date: Some("05/10/2023".to_string()),
            ..Default::default()
        }
        .into_new()
        .unwrap_err();
        assert!(matches!(err, InputError::Malformed(_)));
    }

    #[test]
    fn order_date_round_trips_as_calendar_date() {
        let date = parse_order_date("2023-10-05").unwrap();
        assert_eq!(
            serde_json::to_value(date).unwrap(),
            serde_json::json!("2023-10-05")
        );
    }
}
