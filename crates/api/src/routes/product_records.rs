//! Product record endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use common::{ProductRecord, ProductRecordPatch};
use store::Store;

use crate::error::ApiError;
use crate::extract::{Data, JsonBody, created, ok, parse_id};
use crate::state::AppState;

pub fn router<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route(
            "/{id}",
            get(find::<S>).patch(update::<S>).delete(delete::<S>),
        )
}

/// GET /product-records
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<ProductRecord>>>, ApiError> {
    Ok(ok(state.product_records.list().await?))
}

/// GET /product-records/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<ProductRecord>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.product_records.get(id).await?))
}

/// POST /product-records
///
/// `last_update_date` is stamped by the service; a client-supplied value is ignored.
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<ProductRecordPatch>,
) -> Result<(StatusCode, Json<Data<ProductRecord>>), ApiError> {
    let record = patch.into_new(Utc::now())?;
    Ok(created(state.product_records.create(record).await?))
}

/// PATCH /product-records/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ProductRecordPatch>,
) -> Result<Json<Data<ProductRecord>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.product_records.update(id, patch).await?))
}

/// DELETE /product-records/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.product_records.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
