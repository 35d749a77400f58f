use serde::{Deserialize, Serialize};

use crate::types::Id;

/// Product category. Read-only; rows are seeded with the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: Id,
    pub name: String,
    pub description: String,
}
