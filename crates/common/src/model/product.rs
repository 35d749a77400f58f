use serde::{Deserialize, Serialize};

use crate::types::{Cause, Id, InputError, Validate};
use crate::validation::Causes;

/// A catalog product sold by a seller. `product_code` is unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub product_code: String,
    pub description: String,
    pub height: f64,
    pub length: f64,
    pub width: f64,
    pub net_weight: f64,
    pub expiration_rate: f64,
    pub recommended_freezing_temperature: f64,
    pub freezing_rate: f64,
    pub product_type_id: Id,
    pub seller_id: Id,
}

impl Validate for Product {
    fn validate(&self) -> Vec<Cause> {
        let mut causes = Causes::new();
        causes
            .text("product_code", &self.product_code)
            .text("description", &self.description)
            .positive("height", self.height)
            .positive("length", self.length)
            .positive("width", self.width)
            .positive("net_weight", self.net_weight)
            .positive("expiration_rate", self.expiration_rate)
            .temperature(
                "recommended_freezing_temperature",
                self.recommended_freezing_temperature,
            )
            .positive("freezing_rate", self.freezing_rate);
        causes.into_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    pub product_code: Option<String>,
    pub description: Option<String>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub net_weight: Option<f64>,
    pub expiration_rate: Option<f64>,
    pub recommended_freezing_temperature: Option<f64>,
    pub freezing_rate: Option<f64>,
    pub product_type_id: Option<Id>,
    pub seller_id: Option<Id>,
}

impl ProductPatch {
    pub fn into_new(self) -> Result<Product, InputError> {
        match (
            self.product_code,
            self.description,
            self.height,
            self.length,
            self.width,
            self.net_weight,
            self.expiration_rate,
            self.recommended_freezing_temperature,
            self.freezing_rate,
            self.product_type_id,
            self.seller_id,
        ) {
            (
                Some(product_code),
                Some(description),
                Some(height),
                Some(length),
                Some(width),
                Some(net_weight),
                Some(expiration_rate),
                Some(recommended_freezing_temperature),
                Some(freezing_rate),
                Some(product_type_id),
                Some(seller_id),
            ) => Ok(Product {
                id: 0,
                product_code,
                description,
                height,
                length,
                width,
                net_weight,
                expiration_rate,
                recommended_freezing_temperature,
                freezing_rate,
                product_type_id,
                seller_id,
            }),
            (
                product_code,
                description,
                height,
                length,
                width,
                net_weight,
                expiration_rate,
                recommended_freezing_temperature,
                freezing_rate,
                product_type_id,
                seller_id,
            ) => Err(InputError::missing(&[
                ("product_code", product_code.is_none()),
                ("description", description.is_none()),
                ("height", height.is_none()),
                ("length", length.is_none()),
                ("width", width.is_none()),
                ("net_weight", net_weight.is_none()),
                ("expiration_rate", expiration_rate.is_none()),
                (
                    "recommended_freezing_temperature",
                    recommended_freezing_temperature.is_none(),
                ),
                ("freezing_rate", freezing_rate.is_none()),
                ("product_type_id", product_type_id.is_none()),
                ("seller_id", seller_id.is_none()),
            ])),
        }
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(product_code) = self.product_code {
            product.product_code = product_code;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(height) = self.height {
            product.height = height;
        }
        if let Some(length) = self.length {
            product.length = length;
        }
        if let Some(width) = self.width {
            product.width = width;
        }
        if let Some(net_weight) = self.net_weight {
            product.net_weight = net_weight;
        }
        if let Some(expiration_rate) = self.expiration_rate {
            product.expiration_rate = expiration_rate;
        }
        if let Some(temperature) = self.recommended_freezing_temperature {
            product.recommended_freezing_temperature = temperature;
        }
        if let Some(freezing_rate) = self.freezing_rate {
            product.freezing_rate = freezing_rate;
        }
        if let Some(product_type_id) = self.product_type_id {
            product.product_type_id = product_type_id;
        }
        if let Some(seller_id) = self.seller_id {
            product.seller_id = seller_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 1,
            product_code: "P-001".to_string(),
            description: "Frozen peas".to_string(),
            height: 10.0,
            length: 20.0,
            width: 5.0,
            net_weight: 1.0,
            expiration_rate: 0.5,
            recommended_freezing_temperature: -18.0,
            freezing_rate: 1.0,
            product_type_id: 1,
            seller_id: 1,
        }
    }

    #[test]
    fn dimensions_must_be_positive() {
        let causes = Product {
            height: 0.0,
            width: -2.0,
            ..product()
        }
        .validate();
        let fields: Vec<_> = causes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["height", "width"]);
    }

    #[test]
    fn temperatures_bounded_by_absolute_zero() {
        let causes = Product {
            recommended_freezing_temperature: -300.0,
            ..product()
        }
        .validate();
        assert_eq!(causes.len(), 1);
        assert_eq!(
            causes[0].message,
            "must be greater than or equal to -273.15"
        );
    }

    #[test]
    fn freezing_rate_is_a_positive_quantity() {
        let causes = Product {
            freezing_rate: -1.0,
            ..product()
        }
        .validate();
        assert_eq!(causes.len(), 1);
        assert_eq!(causes[0].field, "freezing_rate");
        assert_eq!(causes[0].message, "must be greater than 0");
    }

    #[test]
    fn references_are_left_to_the_existence_check() {
        let causes = Product {
            product_type_id: 0,
            seller_id: -4,
            ..product()
        }
        .validate();
        assert!(causes.is_empty(), "{causes:?}");
    }
}
