use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    pub id: Id,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Validate for Buyer {
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
pub struct BuyerPatch {
    pub card_number_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl BuyerPatch {
    pub fn into_new(self) -> Result<Buyer, InputError> {
        match (self.card_number_id, self.first_name, self.last_name) {
            (Some(card_number_id), Some(first_name), Some(last_name)) => Ok(Buyer {
                id: 0,
                card_number_id,
                first_name,
                last_name,
            }),
            (card_number_id, first_name, last_name) => Err(InputError::missing(&[
                ("card_number_id", card_number_id.is_none()),
                ("first_name", first_name.is_none()),
                ("last_name", last_name.is_none()),
            ])),
        }
    }

    pub fn apply(self, buyer: &mut Buyer) {
        if let Some(card_number_id) = self.card_number_id {
            buyer.card_number_id = card_number_id;
        }
        if let Some(first_name) = self.first_name {
            buyer.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            buyer.last_name = last_name;
        }
    }
}
