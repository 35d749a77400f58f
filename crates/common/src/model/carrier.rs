use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// A transport company serving a locality. `cid` is unique across carriers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: Id,
    pub cid: String,
    pub company_name: String,
    pub address: String,
    pub phone_number: String,
    pub locality_id: Id,
}

impl Validate for Carrier {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .text("cid", &self.cid)
            .text("company_name", &self.company_name)
            .text("address", &self.address)
            .text("phone_number", &self.phone_number);
        causes.into_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CarrierPatch {
    pub cid: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub locality_id: Option<Id>,
}

impl CarrierPatch {
    pub fn into_new(self) -> Result<Carrier, InputError> {
        match (
            self.cid,
            self.company_name,
            self.address,
            self.phone_number,
            self.locality_id,
        ) {
            (
                Some(cid),
                Some(company_name),
                Some(address),
                Some(phone_number),
                Some(locality_id),
            ) => Ok(Carrier {
                id: 0,
                cid,
                company_name,
                address,
                phone_number,
                locality_id,
            }),
            (cid, company_name, address, phone_number, locality_id) => {
                Err(InputError::missing(&[
                    ("cid", cid.is_none()),
                    ("company_name", company_name.is_none()),
                    ("address", address.is_none()),
                    ("phone_number", phone_number.is_none()),
                    ("locality_id", locality_id.is_none()),
                ]))
            }
        }
    }

    pub fn apply(self, carrier: &mut Carrier) {
        if let Some(cid) = self.cid {
            carrier.cid = cid;
        }
        if let Some(company_name) = self.company_name {
            carrier.company_name = company_name;
        }
        if let Some(address) = self.address {
            carrier.address = address;
        }
        if let Some(phone_number) = self.phone_number {
            carrier.phone_number = phone_number;
        }
        if let Some(locality_id) = self.locality_id {
            carrier.locality_id = locality_id;
        }
    }
}
