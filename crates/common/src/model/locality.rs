use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// A city. Unlike other entities its id is supplied by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    pub id: Id,
    pub locality_name: String,
    pub province_name: String,
    pub country_name: String,
}

impl Validate for Locality {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .positive("id", self.id)
            .text("locality_name", &self.locality_name)
            .text("province_name", &self.province_name)
            .text("country_name", &self.country_name);
        causes.into_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocalityPatch {
    pub id: Option<Id>,
    pub locality_name: Option<String>,
    pub province_name: Option<String>,
    pub country_name: Option<String>,
}

impl LocalityPatch {
    pub fn into_new(self) -> Result<Locality, InputError> {
        match (
            self.id,
            self.locality_name,
            self.province_name,
            self.country_name,
        ) {
            (Some(id), Some(locality_name), Some(province_name), Some(country_name)) => {
                Ok(Locality {
                    id,
                    locality_name,
                    province_name,
                    country_name,
                })
            }
            (id, locality_name, province_name, country_name) => Err(InputError::missing(&[
                ("id", id.is_none()),
                ("locality_name", locality_name.is_none()),
                ("province_name", province_name.is_none()),
                ("country_name", country_name.is_none()),
            ])),
        }
    }

    /// The id is the natural key and never changes through a patch.
    pub fn apply(self, locality: &mut Locality) {
        if let Some(locality_name) = self.locality_name {
            locality.locality_name = locality_name;
        }
        if let Some(province_name) = self.province_name {
            locality.province_name = province_name;
        }
        if let Some(country_name) = self.country_name {
            locality.country_name = country_name;
        }
    }
}
