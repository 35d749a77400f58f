//! Steps shared by every aggregate's write path: validate, check the natural
//! key, check references, write. Outcomes are counted per entity.

use common::{Id, Validate};
use metrics::counter;
use store::StoreError;

use crate::error::{DomainError, Result};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Op {
    Create,
    Update,
    Delete,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::Create => "create",
            Op::Update => "update",
            Op::Delete => "delete",
        }
    }
}

pub(crate) fn validate(entity: &impl Validate) -> Result<()> {
    let causes = entity.validate();
    if causes.is_empty() {
        Ok(())
    } else {
        Err(DomainError::invalid(causes))
    }
}

/// Passes when no row holds the key or when the holder is `target` itself.
pub(crate) fn ensure_unique<T>(
    lookup: store::Result<T>,
    holder: impl Fn(&T) -> Id,
    target: Id,
    conflict: &str,
) -> Result<()> {
    match lookup {
        Ok(found) if holder(&found) != target => Err(DomainError::conflict(conflict)),
        Ok(_) => Ok(()),
        Err(err) if err.is_not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// A `Duplicated` on write means another request claimed the key after our check.
pub(crate) fn write_failed(err: StoreError, conflict: &str) -> DomainError {
    match err {
        StoreError::Duplicated { .. } => DomainError::conflict(conflict),
        other => other.into(),
    }
}

pub(crate) fn record<T>(entity: &'static str, op: Op, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => {
            counter!("entity_writes_total", "entity" => entity, "op" => op.as_str()).increment(1);
        }
        Err(err) => {
            tracing::warn!(entity, op = op.as_str(), error = %err, "write rejected");
            counter!(
                "entity_write_rejections_total",
                "entity" => entity,
                "reason" => err.reason()
            )
            .increment(1);
        }
    }
    result
}

pub(crate) fn report_query(report: &'static str) {
    counter!("report_queries_total", "report" => report).increment(1);
}
