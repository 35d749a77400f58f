use thiserror::Error;

/// Errors surfaced by repositories.
///
/// `entity` is the human-readable name of the table involved, e.g. `"product batch"`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with the requested key, or a referenced row is missing on write.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A unique constraint rejected the write.
    #[error("{entity} violates unique constraint {constraint}")]
    Duplicated {
        entity: &'static str,
        constraint: String,
    },

    /// The row cannot be deleted while other rows reference it.
    #[error("{entity} is referenced by other records")]
    Referenced { entity: &'static str },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn not_found(entity: &'static str) -> Self {
        StoreError::NotFound { entity }
    }

    pub fn duplicated(entity: &'static str, constraint: impl Into<String>) -> Self {
        StoreError::Duplicated {
            entity,
            constraint: constraint.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StoreError>;
