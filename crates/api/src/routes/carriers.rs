//! Carrier endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{Carrier, CarrierPatch};
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

/// GET /carries
///
/// Also mounted at `/carriers`.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<Carrier>>>, ApiError> {
    Ok(ok(state.carriers.list().await?))
}

/// GET /carries/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<Carrier>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.carriers.get(id).await?))
}

/// POST /carries
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<CarrierPatch>,
) -> Result<(StatusCode, Json<Data<Carrier>>), ApiError> {
    let carrier = state.carriers.create(patch.into_new()?).await?;
    Ok(created(carrier))
}

/// PATCH /carries/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<CarrierPatch>,
) -> Result<Json<Data<Carrier>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.carriers.update(id, patch).await?))
}

/// DELETE /carries/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.carriers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
