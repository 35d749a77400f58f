use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// A lot of one product stored in a section. `batch_number` is unique.
///
/// Dates are kept as the client sent them; only presence is checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductBatch {
    pub id: Id,
    pub batch_number: i64,
    pub current_quantity: i64,
    pub current_temperature: f64,
    pub due_date: String,
    pub initial_quantity: i64,
    pub manufacturing_date: String,
    pub manufacturing_hour: i32,
    pub minimum_temperature: f64,
    pub product_id: Id,
    pub section_id: Id,
}

impl Validate for ProductBatch {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .positive("batch_number", self.batch_number)
            .non_negative("current_quantity", self.current_quantity)
            .temperature("current_temperature", self.current_temperature)
            .text("due_date", &self.due_date)
            .positive("initial_quantity", self.initial_quantity)
            .text("manufacturing_date", &self.manufacturing_date)
            .between("manufacturing_hour", self.manufacturing_hour, 0, 23)
            .temperature("minimum_temperature", self.minimum_temperature);
        causes.into_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductBatchPatch {
    pub batch_number: Option<i64>,
    pub current_quantity: Option<i64>,
    pub current_temperature: Option<f64>,
    pub due_date: Option<String>,
    pub initial_quantity: Option<i64>,
    pub manufacturing_date: Option<String>,
    pub manufacturing_hour: Option<i32>,
    pub minimum_temperature: Option<f64>,
    pub product_id: Option<Id>,
    pub section_id: Option<Id>,
}

impl ProductBatchPatch {
    pub fn into_new(self) -> Result<ProductBatch, InputError> {
        match (
            self.batch_number,
            self.current_quantity,
            self.current_temperature,
            self.due_date,
            self.initial_quantity,
            self.manufacturing_date,
            self.manufacturing_hour,
            self.minimum_temperature,
            self.product_id,
            self.section_id,
        ) {
            (
                Some(batch_number),
                Some(current_quantity),
                Some(current_temperature),
                Some(due_date),
                Some(initial_quantity),
                Some(manufacturing_date),
                Some(manufacturing_hour),
                Some(minimum_temperature),
                Some(product_id),
                Some(section_id),
            ) => Ok(ProductBatch {
                id: 0,
                batch_number,
                current_quantity,
                current_temperature,
                due_date,
                initial_quantity,
                manufacturing_date,
                manufacturing_hour,
                minimum_temperature,
                product_id,
                section_id,
            }),
            (
                batch_number,
                current_quantity,
                current_temperature,
                due_date,
                initial_quantity,
                manufacturing_date,
                manufacturing_hour,
                minimum_temperature,
                product_id,
                section_id,
            ) => Err(InputError::missing(&[
                ("batch_number", batch_number.is_none()),
                ("current_quantity", current_quantity.is_none()),
                ("current_temperature", current_temperature.is_none()),
                ("due_date", due_date.is_none()),
                ("initial_quantity", initial_quantity.is_none()),
                ("manufacturing_date", manufacturing_date.is_none()),
                ("manufacturing_hour", manufacturing_hour.is_none()),
                ("minimum_temperature", minimum_temperature.is_none()),
                ("product_id", product_id.is_none()),
                ("section_id", section_id.is_none()),
            ])),
        }
    }

    pub fn apply(self, batch: &mut ProductBatch) {
        if let Some(batch_number) = self.batch_number {
            batch.batch_number = batch_number;
        }
        if let Some(current_quantity) = self.current_quantity {
            batch.current_quantity = current_quantity;
        }
        if let Some(current_temperature) = self.current_temperature {
            batch.current_temperature = current_temperature;
        }
        if let Some(due_date) = self.due_date {
            batch.due_date = due_date;
        }
        if let Some(initial_quantity) = self.initial_quantity {
            batch.initial_quantity = initial_quantity;
        }
        if let Some(manufacturing_date) = self.manufacturing_date {
            batch.manufacturing_date = manufacturing_date;
        }
        if let Some(manufacturing_hour) = self.manufacturing_hour {
            batch.manufacturing_hour = manufacturing_hour;
        }
        if let Some(minimum_temperature) = self.minimum_temperature {
            batch.minimum_temperature = minimum_temperature;
        }
        if let Some(product_id) = self.product_id {
            batch.product_id = product_id;
        }
        if let Some(section_id) = self.section_id {
            batch.section_id = section_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> ProductBatch {
        ProductBatch {
            id: 1,
            batch_number: 111,
            current_quantity: 0,
            current_temperature: -10.0,
            due_date: "2024-12-01".to_string(),
            initial_quantity: 50,
            manufacturing_date: "2024-06-01".to_string(),
            manufacturing_hour: 8,
            minimum_temperature: -20.0,
            product_id: 1,
            section_id: 1,
        }
    }

    #[test]
    fn empty_current_quantity_is_allowed() {
        assert!(batch().validate().is_empty());
    }

    #[test]
    fn initial_quantity_must_be_positive_and_dates_present() {
        let causes = ProductBatch {
            initial_quantity: 0,
            due_date: " ".to_string(),
            manufacturing_hour: 24,
            ..batch()
        }
        .validate();
        let fields: Vec<_> = causes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["due_date", "initial_quantity", "manufacturing_hour"]
        );
    }
}
