//! Warehouse endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{Warehouse, WarehousePatch};
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

/// GET /warehouses
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<Warehouse>>>, ApiError> {
    Ok(ok(state.warehouses.list().await?))
}

/// GET /warehouses/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<Warehouse>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.warehouses.get(id).await?))
}

/// POST /warehouses
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<WarehousePatch>,
) -> Result<(StatusCode, Json<Data<Warehouse>>), ApiError> {
    let warehouse = state.warehouses.create(patch.into_new()?).await?;
    Ok(created(warehouse))
}

/// PATCH /warehouses/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<WarehousePatch>,
) -> Result<Json<Data<Warehouse>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.warehouses.update(id, patch).await?))
}

/// DELETE /warehouses/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.warehouses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
