use serde::{Deserialize, Serialize};

/// Surrogate identifier assigned by the store.
pub type Id = i64;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub field: String,
    pub message: String,
}

impl Cause {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Pure field validation for an entity. An empty list means the entity is valid.
pub trait Validate {
    fn validate(&self) -> Vec<Cause>;
}

/// Failure to turn a wire payload into an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Required fields were absent.
    Missing(Vec<Cause>),
    /// A field was present but could not be parsed.
    Malformed(Vec<Cause>),
}

impl InputError {
    /// Builds a `Missing` error from `(field, is_absent)` pairs.
    pub fn missing(fields: &[(&str, bool)]) -> Self {
        InputError::Missing(
            fields
                .iter()
                .filter(|(_, absent)| *absent)
                .map(|(field, _)| Cause::new(*field, format!("{field} is required")))
                .collect(),
        )
    }

    pub fn malformed(field: &str, message: &str) -> Self {
        InputError::Malformed(vec![Cause::new(field, message)])
    }

    pub fn causes(&self) -> &[Cause] {
        match self {
            InputError::Missing(causes) | InputError::Malformed(causes) => causes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_only_absent_fields() {
        let err = InputError::missing(&[("cid", true), ("address", false), ("telephone", true)]);
        let fields: Vec<_> = err.causes().iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["cid", "telephone"]);
        assert_eq!(err.causes()[0].message, "cid is required");
    }

    #[test]
    fn cause_serializes_as_field_message_pair() {
        let json = serde_json::to_value(Cause::new("order_date", "invalid date format")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"field": "order_date", "message": "invalid date format"})
        );
    }
}
