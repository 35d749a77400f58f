//! PostgreSQL-backed repositories.
//!
//! Constraint names in the migrations are load-bearing: unique violations map
//! to `Duplicated`, and foreign-key violations are resolved to the referenced
//! table through the `fk_<table>_<referenced>` naming scheme.

mod catalog;
mod orders;
mod warehousing;

use async_trait::async_trait;
use common::{Id, ProductType};
use sqlx::error::ErrorKind;
use sqlx::postgres::{PgQueryResult, PgRow};
use sqlx::{PgPool, Row};

use crate::entity::{
    BUYER, EMPLOYEE, LOCALITY, PRODUCT, PRODUCT_BATCH, PRODUCT_RECORD, PRODUCT_TYPE, SECTION,
    SELLER, WAREHOUSE,
};
use crate::repository::ProductTypeRepository;
use crate::{Result, StoreError};

/// PostgreSQL store implementing every repository.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("database migrations applied");
        Ok(())
    }
}

/// Foreign-key constraint suffixes, most specific first.
const REFERENCED_TABLES: &[(&str, &str)] = &[
    ("_product_type", PRODUCT_TYPE),
    ("_product_batch", PRODUCT_BATCH),
    ("_product_record", PRODUCT_RECORD),
    ("_product", PRODUCT),
    ("_locality", LOCALITY),
    ("_seller", SELLER),
    ("_buyer", BUYER),
    ("_employee", EMPLOYEE),
    ("_warehouse", WAREHOUSE),
    ("_section", SECTION),
];

fn referenced_entity(constraint: Option<&str>) -> Option<&'static str> {
    let constraint = constraint?;
    REFERENCED_TABLES
        .iter()
        .find(|(suffix, _)| constraint.ends_with(suffix))
        .map(|(_, entity)| *entity)
}

/// Maps an insert/update failure onto the store taxonomy.
pub(crate) fn write_error(entity: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => {
                return StoreError::duplicated(entity, db_err.constraint().unwrap_or_default());
            }
            ErrorKind::ForeignKeyViolation => {
                if let Some(referenced) = referenced_entity(db_err.constraint()) {
                    return StoreError::not_found(referenced);
                }
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

/// Maps a delete failure; a foreign-key violation means dependents exist.
pub(crate) fn delete_error(entity: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.kind() == ErrorKind::ForeignKeyViolation
    {
        return StoreError::Referenced { entity };
    }
    StoreError::Database(err)
}

/// An UPDATE or DELETE that touched no row addressed a missing id.
pub(crate) fn affected(result: PgQueryResult, entity: &'static str) -> Result<()> {
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(entity));
    }
    Ok(())
}

/// Converts an optional row, failing with `NotFound` when absent.
pub(crate) fn one<T>(
    row: Option<PgRow>,
    entity: &'static str,
    map: fn(&PgRow) -> Result<T>,
) -> Result<T> {
    match row {
        Some(row) => map(&row),
        None => Err(StoreError::not_found(entity)),
    }
}

pub(crate) fn many<T>(rows: Vec<PgRow>, map: fn(&PgRow) -> Result<T>) -> Result<Vec<T>> {
    rows.iter().map(map).collect()
}

/// Report rows for an optional anchor; an explicit anchor that matched nothing is `NotFound`.
pub(crate) fn anchored<T>(
    id: Option<Id>,
    rows: Vec<PgRow>,
    entity: &'static str,
    map: fn(&PgRow) -> Result<T>,
) -> Result<Vec<T>> {
    if id.is_some() && rows.is_empty() {
        return Err(StoreError::not_found(entity));
    }
    many(rows, map)
}

fn product_type_from_row(row: &PgRow) -> Result<ProductType> {
    Ok(ProductType {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
    })
}

#[async_trait]
impl ProductTypeRepository for PostgresStore {
    async fn list_product_types(&self) -> Result<Vec<ProductType>> {
        let rows = sqlx::query("SELECT id, name, description FROM product_types ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        many(rows, product_type_from_row)
    }

    async fn find_product_type(&self, id: Id) -> Result<ProductType> {
        let row = sqlx::query("SELECT id, name, description FROM product_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        one(row, PRODUCT_TYPE, product_type_from_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_key_constraints_resolve_to_referenced_table() {
        let cases = [
            ("fk_sellers_locality", LOCALITY),
            ("fk_sections_product_type", PRODUCT_TYPE),
            ("fk_inbound_orders_product_batch", PRODUCT_BATCH),
            ("fk_purchase_orders_product_record", PRODUCT_RECORD),
            ("fk_product_batches_product", PRODUCT),
            ("fk_inbound_orders_warehouse", WAREHOUSE),
        ];
        for (constraint, entity) in cases {
            assert_eq!(
                referenced_entity(Some(constraint)),
                Some(entity),
                "{constraint}"
            );
        }
        assert_eq!(referenced_entity(Some("something_else")), None);
        assert_eq!(referenced_entity(None), None);
    }
}
