use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::{ABSOLUTE_ZERO, Causes, MAX_TEMPERATURE};

/// A storage site. `warehouse_code` is unique across warehouses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Id,
    pub warehouse_code: String,
    pub address: String,
    pub telephone: String,
    pub minimum_capacity: i64,
    pub minimum_temperature: f64,
}

impl Validate for Warehouse {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .text("warehouse_code", &self.warehouse_code)
            .text("address", &self.address)
            .telephone("telephone", &self.telephone)
            .non_negative("minimum_capacity", self.minimum_capacity)
            .between(
                "minimum_temperature",
                self.minimum_temperature,
                ABSOLUTE_ZERO,
                MAX_TEMPERATURE,
            );
        causes.into_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WarehousePatch {
    pub warehouse_code: Option<String>,
    pub address: Option<String>,
    pub telephone: Option<String>,
    pub minimum_capacity: Option<i64>,
    pub minimum_temperature: Option<f64>,
}

impl WarehousePatch {
    pub fn into_new(self) -> Result<Warehouse, InputError> {
        match (
            self.warehouse_code,
            self.address,
            self.telephone,
            self.minimum_capacity,
            self.minimum_temperature,
        ) {
            (
                Some(warehouse_code),
                Some(address),
                Some(telephone),
                Some(minimum_capacity),
                Some(minimum_temperature),
            ) => Ok(Warehouse {
                id: 0,
                warehouse_code,
                address,
                telephone,
                minimum_capacity,
                minimum_temperature,
            }),
            (warehouse_code, address, telephone, minimum_capacity, minimum_temperature) => {
                Err(InputError::missing(&[
                    ("warehouse_code", warehouse_code.is_none()),
                    ("address", address.is_none()),
                    ("telephone", telephone.is_none()),
                    ("minimum_capacity", minimum_capacity.is_none()),
                    ("minimum_temperature", minimum_temperature.is_none()),
                ]))
            }
        }
    }

    pub fn apply(self, warehouse: &mut Warehouse) {
        if let Some(warehouse_code) = self.warehouse_code {
            warehouse.warehouse_code = warehouse_code;
        }
        if let Some(address) = self.address {
            warehouse.address = address;
        }
        if let Some(telephone) = self.telephone {
            warehouse.telephone = telephone;
        }
        if let Some(minimum_capacity) = self.minimum_capacity {
            warehouse.minimum_capacity = minimum_capacity;
        }
        if let Some(minimum_temperature) = self.minimum_temperature {
            warehouse.minimum_temperature = minimum_temperature;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse() -> Warehouse {
        Warehouse {
            id: 1,
            warehouse_code: "WH-01".to_string(),
            address: "Av. Paulista 1000".to_string(),
            telephone: "(11) 4444-5555".to_string(),
            minimum_capacity: 10,
            minimum_temperature: -18.0,
        }
    }

    #[test]
    fn valid_warehouse() {
        assert!(warehouse().validate().is_empty());
    }

    #[test]
    fn temperature_outside_physical_range() {
        for temperature in [-273.16, 1000.5] {
            let causes = Warehouse {
                minimum_temperature: temperature,
                ..warehouse()
            }
            .validate();
            assert_eq!(causes.len(), 1);
            assert_eq!(causes[0].field, "minimum_temperature");
        }
    }

    #[test]
    fn telephone_and_capacity_rules() {
        let causes = Warehouse {
            telephone: "555".to_string(),
            minimum_capacity: -1,
            ..warehouse()
        }
        .validate();
        let fields: Vec<_> = causes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["telephone", "minimum_capacity"]);
    }
}
