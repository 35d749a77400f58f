use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// A temperature-controlled area of a warehouse holding one product type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Id,
    pub section_number: i64,
    pub current_temperature: f64,
    pub minimum_temperature: f64,
    pub current_capacity: i64,
    pub minimum_capacity: i64,
    pub maximum_capacity: i64,
    pub warehouse_id: Id,
    pub product_type_id: Id,
}

impl Validate for Section {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .positive("section_number", self.section_number)
            .temperature("current_temperature", self.current_temperature)
            .temperature("minimum_temperature", self.minimum_temperature)
            .non_negative("current_capacity", self.current_capacity)
            .non_negative("minimum_capacity", self.minimum_capacity)
            .non_negative("maximum_capacity", self.maximum_capacity);
        causes.into_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionPatch {
    pub section_number: Option<i64>,
    pub current_temperature: Option<f64>,
    pub minimum_temperature: Option<f64>,
    pub current_capacity: Option<i64>,
    pub minimum_capacity: Option<i64>,
    pub maximum_capacity: Option<i64>,
    pub warehouse_id: Option<Id>,
    pub product_type_id: Option<Id>,
}

impl SectionPatch {
    pub fn into_new(self) -> Result<Section, InputError> {
        match (
            self.section_number,
            self.current_temperature,
            self.minimum_temperature,
            self.current_capacity,
            self.minimum_capacity,
            self.maximum_capacity,
            self.warehouse_id,
            self.product_type_id,
        ) {
            (
                Some(section_number),
                Some(current_temperature),
                Some(minimum_temperature),
                Some(current_capacity),
                Some(minimum_capacity),
                Some(maximum_capacity),
                Some(warehouse_id),
                Some(product_type_id),
            ) => Ok(Section {
                id: 0,
                section_number,
                current_temperature,
                minimum_temperature,
                current_capacity,
                minimum_capacity,
                maximum_capacity,
                warehouse_id,
                product_type_id,
            }),
            (
                section_number,
                current_temperature,
                minimum_temperature,
                current_capacity,
                minimum_capacity,
                maximum_capacity,
                warehouse_id,
                product_type_id,
            ) => Err(InputError::missing(&[
                ("section_number", section_number.is_none()),
                ("current_temperature", current_temperature.is_none()),
                ("minimum_temperature", minimum_temperature.is_none()),
                ("current_capacity", current_capacity.is_none()),
                ("minimum_capacity", minimum_capacity.is_none()),
                ("maximum_capacity", maximum_capacity.is_none()),
                ("warehouse_id", warehouse_id.is_none()),
                ("product_type_id", product_type_id.is_none()),
            ])),
        }
    }

    pub fn apply(self, section: &mut Section) {
        if let Some(section_number) = self.section_number {
            section.section_number = section_number;
        }
        if let Some(current_temperature) = self.current_temperature {
            section.current_temperature = current_temperature;
        }
        if let Some(minimum_temperature) = self.minimum_temperature {
            section.minimum_temperature = minimum_temperature;
        }
        if let Some(current_capacity) = self.current_capacity {
            section.current_capacity = current_capacity;
        }
        if let Some(minimum_capacity) = self.minimum_capacity {
            section.minimum_capacity = minimum_capacity;
        }
        if let Some(maximum_capacity) = self.maximum_capacity {
            section.maximum_capacity = maximum_capacity;
        }
        if let Some(warehouse_id) = self.warehouse_id {
            section.warehouse_id = warehouse_id;
        }
        if let Some(product_type_id) = self.product_type_id {
            section.product_type_id = product_type_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_section_number_and_negative_capacity() {
        let section = Section {
            id: 1,
            section_number: 0,
            current_temperature: 2.0,
            minimum_temperature: -5.0,
            current_capacity: -1,
            minimum_capacity: 0,
            maximum_capacity: 100,
            warehouse_id: 1,
            product_type_id: 1,
        };
        let fields: Vec<_> = section.validate().into_iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["section_number", "current_capacity"]);
    }
}
