use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// A price snapshot of a product. `last_update_date` serializes as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Id,
    pub last_update_date: DateTime<Utc>,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub product_id: Id,
}

impl Validate for ProductRecord {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .check(
                self.last_update_date > DateTime::<Utc>::UNIX_EPOCH,
                "last_update_date",
                "must be set",
            )
            .positive("purchase_price", self.purchase_price)
            .positive("sale_price", self.sale_price);
        causes.into_vec()
    }
}

/// Client-settable record fields. The update date is always stamped by the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductRecordPatch {
    pub purchase_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub product_id: Option<Id>,
}

impl ProductRecordPatch {
    pub fn into_new(self, now: DateTime<Utc>) -> Result<ProductRecord, InputError> {
        match (self.purchase_price, self.sale_price, self.product_id) {
            (Some(purchase_price), Some(sale_price), Some(product_id)) => Ok(ProductRecord {
                id: 0,
                last_update_date: now,
                purchase_price,
                sale_price,
                product_id,
            }),
            (purchase_price, sale_price, product_id) => Err(InputError::missing(&[
                ("purchase_price", purchase_price.is_none()),
                ("sale_price", sale_price.is_none()),
                ("product_id", product_id.is_none()),
            ])),
        }
    }

    pub fn apply(self, record: &mut ProductRecord, now: DateTime<Utc>) {
        if let Some(purchase_price) = self.purchase_price {
            record.purchase_price = purchase_price;
        }
        if let Some(sale_price) = self.sale_price {
            record.sale_price = sale_price;
        }
        if let Some(product_id) = self.product_id {
            record.product_id = product_id;
        }
        record.last_update_date = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_date_and_zero_price_are_invalid() {
        let record = ProductRecord {
            id: 1,
            last_update_date: DateTime::<Utc>::UNIX_EPOCH,
            purchase_price: 0.0,
            sale_price: 12.5,
            product_id: 1,
        };
        let fields: Vec<_> = record.validate().into_iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["last_update_date", "purchase_price"]);
    }

    #[test]
    fn apply_restamps_update_date() {
        let created = Utc::now();
        let mut record = ProductRecordPatch {
            purchase_price: Some(10.0),
            sale_price: Some(15.0),
            product_id: Some(3),
        }
        .into_new(created)
        .unwrap();

        let later = created + chrono::Duration::seconds(5);
        ProductRecordPatch {
            sale_price: Some(16.0),
            ..Default::default()
        }
        .apply(&mut record, later);

        assert_eq!(record.last_update_date, later);
        assert_eq!(record.sale_price, 16.0);
        assert_eq!(record.purchase_price, 10.0);
    }

    #[test]
    fn last_update_date_serializes_as_rfc3339() {
        let record = ProductRecord {
            id: 1,
            last_update_date: "2024-05-01T10:00:00Z".parse().unwrap(),
            purchase_price: 1.0,
            sale_price: 2.0,
            product_id: 1,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["last_update_date"], "2024-05-01T10:00:00Z");
    }
}
