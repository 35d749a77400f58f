use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::purchase_order::parse_order_date;
use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// Receipt of a product batch into a warehouse, registered by an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundOrder {
    pub id: Id,
    pub order_date: NaiveDate,
    pub order_number: String,
    pub employee_id: Id,
    pub product_batch_id: Id,
    pub warehouse_id: Id,
}

impl Validate for InboundOrder {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes.text("order_number", &self.order_number);
        causes.into_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InboundOrderPatch {
    pub order_date: Option<String>,
    pub order_number: Option<String>,
    pub employee_id: Option<Id>,
    pub product_batch_id: Option<Id>,
    pub warehouse_id: Option<Id>,
}

impl InboundOrderPatch {
    pub fn into_new(self) -> Result<InboundOrder, InputError> {
        let order_date = self
            .order_date
            .as_deref()
            .map(parse_order_date)
            .transpose()?;
        match (
            order_date,
            self.order_number,
            self.employee_id,
            self.product_batch_id,
            self.warehouse_id,
        ) {
            (
                Some(order_date),
                Some(order_number),
                Some(employee_id),
                Some(product_batch_id),
                Some(warehouse_id),
            ) => Ok(InboundOrder {
                id: 0,
                order_date,
                order_number,
                employee_id,
                product_batch_id,
                warehouse_id,
            }),
            (order_date, order_number, employee_id, product_batch_id, warehouse_id) => {
                Err(InputError::missing(&[
                    ("order_date", order_date.is_none()),
                    ("order_number", order_number.is_none()),
                    ("employee_id", employee_id.is_none()),
                    ("product_batch_id", product_batch_id.is_none()),
                    ("warehouse_id", warehouse_id.is_none()),
                ]))
            }
        }
    }

    pub fn apply(self, order: &mut InboundOrder) -> Result<(), InputError> {
        if let Some(order_date) = self.order_date {
            order.order_date = parse_order_date(&order_date)?;
        }
        if let Some(order_number) = self.order_number {
            order.order_number = order_number;
        }
        if let Some(employee_id) = self.employee_id {
            order.employee_id = employee_id;
        }
        if let Some(product_batch_id) = self.product_batch_id {
            order.product_batch_id = product_batch_id;
        }
        if let Some(warehouse_id) = self.warehouse_id {
            order.warehouse_id = warehouse_id;
        }
        Ok(())
    }
}
