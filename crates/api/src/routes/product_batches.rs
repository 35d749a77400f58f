//! Product batch endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{ProductBatch, ProductBatchPatch};
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

/// GET /product-batches
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<ProductBatch>>>, ApiError> {
    Ok(ok(state.product_batches.list().await?))
}

/// GET /product-batches/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<ProductBatch>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.product_batches.get(id).await?))
}

/// POST /product-batches
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<ProductBatchPatch>,
) -> Result<(StatusCode, Json<Data<ProductBatch>>), ApiError> {
    let batch = state.product_batches.create(patch.into_new()?).await?;
    Ok(created(batch))
}

/// PATCH /product-batches/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ProductBatchPatch>,
) -> Result<Json<Data<ProductBatch>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.product_batches.update(id, patch).await?))
}

/// DELETE /product-batches/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.product_batches.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
