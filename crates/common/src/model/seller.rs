use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// A company supplying products. `cid` is unique across sellers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Id,
    pub cid: i64,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: Id,
}

impl Validate for Seller {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .positive("cid", self.cid)
            .text("company_name", &self.company_name)
            .text("address", &self.address)
            .text("telephone", &self.telephone);
        causes.into_vec()
    }
}

/// Seller fields as they arrive on the wire; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SellerPatch {
    pub cid: Option<i64>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub telephone: Option<String>,
    pub locality_id: Option<Id>,
}

impl SellerPatch {
    /// Builds a new seller, requiring every field.
    pub fn into_new(self) -> Result<Seller, InputError> {
        match (
            self.cid,
            self.company_name,
            self.address,
            self.telephone,
            self.locality_id,
        ) {
            (Some(cid), Some(company_name), Some(address), Some(telephone), Some(locality_id)) => {
                Ok(Seller {
                    id: 0,
                    cid,
                    company_name,
                    address,
                    telephone,
                    locality_id,
                })
            }
            (cid, company_name, address, telephone, locality_id) => Err(InputError::missing(&[
                ("cid", cid.is_none()),
                ("company_name", company_name.is_none()),
                ("address", address.is_none()),
                ("telephone", telephone.is_none()),
                ("locality_id", locality_id.is_none()),
            ])),
        }
    }

    /// Overwrites the fields present in the patch.
    pub fn apply(self, seller: &mut Seller) {
        if let Some(cid) = self.cid {
            seller.cid = cid;
        }
        if let Some(company_name) = self.company_name {
            seller.company_name = company_name;
        }
        if let Some(address) = self.address {
            seller.address = address;
        }
        if let Some(telephone) = self.telephone {
            seller.telephone = telephone;
        }
        if let Some(locality_id) = self.locality_id {
            seller.locality_id = locality_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller() -> Seller {
        Seller {
            id: 1,
            cid: 123,
            company_name: "Test".to_string(),
            address: "Rua 1".to_string(),
            telephone: "11 91332-3232".to_string(),
            locality_id: 1,
        }
    }

    #[test]
    fn valid_seller_has_no_causes() {
        assert!(seller().validate().is_empty());
    }

    #[test]
    fn blank_strings_and_zero_cid_are_reported() {
        let invalid = Seller {
            cid: 0,
            company_name: String::new(),
            ..seller()
        };
        let fields: Vec<_> = invalid.validate().into_iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["cid", "company_name"]);
    }

    #[test]
    fn into_new_requires_every_field() {
        let err = SellerPatch {
            cid: Some(1),
            ..Default::default()
        }
        .into_new()
        .unwrap_err();
        assert!(matches!(err, InputError::Missing(ref causes) if causes.len() == 4));
    }

    #[test]
    fn apply_keeps_unset_fields() {
        let mut target = seller();
        SellerPatch {
            address: Some("Rua 2".to_string()),
            ..Default::default()
        }
        .apply(&mut target);
        assert_eq!(target.address, "Rua 2");
        assert_eq!(target.cid, 123);
        assert_eq!(target.company_name, "Test");
    }
}
