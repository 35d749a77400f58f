use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// Warehouse staff member. `card_number_id` is unique across employees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Id,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: Id,
}

impl Validate for Employee {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .text("card_number_id", &self.card_number_id)
            .text("first_name", &self.first_name)
            .text("last_name", &self.last_name);
        causes.into_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EmployeePatch {
    pub card_number_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub warehouse_id: Option<Id>,
}

impl EmployeePatch {
    pub fn into_new(self) -> Result<Employee, InputError> {
        match (
            self.card_number_id,
            self.first_name,
            self.last_name,
            self.warehouse_id,
        ) {
            (Some(card_number_id), Some(first_name), Some(last_name), Some(warehouse_id)) => {
                Ok(Employee {
                    id: 0,
                    card_number_id,
                    first_name,
                    last_name,
                    warehouse_id,
                })
            }
            (card_number_id, first_name, last_name, warehouse_id) => Err(InputError::missing(&[
                ("card_number_id", card_number_id.is_none()),
                ("first_name", first_name.is_none()),
                ("last_name", last_name.is_none()),
                ("warehouse_id", warehouse_id.is_none()),
            ])),
        }
    }

    pub fn apply(self, employee: &mut Employee) {
        if let Some(card_number_id) = self.card_number_id {
            employee.card_number_id = card_number_id;
        }
        if let Some(first_name) = self.first_name {
            employee.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            employee.last_name = last_name;
        }
        if let Some(warehouse_id) = self.warehouse_id {
            employee.warehouse_id = warehouse_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_warehouse_is_reported_once() {
        let err = EmployeePatch {
            card_number_id: Some("E-1".to_string()),
            first_name: Some("Ana".to_string()),
            last_name: Some("Lima".to_string()),
            warehouse_id: None,
        }
        .into_new()
        .unwrap_err();
        assert_eq!(err.causes().len(), 1);
        assert_eq!(err.causes()[0].field, "warehouse_id");
    }
}
