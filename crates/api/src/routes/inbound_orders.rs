//! Inbound order endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{InboundOrder, InboundOrderPatch};
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

/// GET /inbound-orders
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<InboundOrder>>>, ApiError> {
    Ok(ok(state.inbound_orders.list().await?))
}

/// GET /inbound-orders/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<InboundOrder>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.inbound_orders.get(id).await?))
}

/// POST /inbound-orders
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<InboundOrderPatch>,
) -> Result<(StatusCode, Json<Data<InboundOrder>>), ApiError> {
    let order = state.inbound_orders.create(patch.into_new()?).await?;
    Ok(created(order))
}

/// PATCH /inbound-orders/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<InboundOrderPatch>,
) -> Result<Json<Data<InboundOrder>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.inbound_orders.update(id, patch).await?))
}

/// DELETE /inbound-orders/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.inbound_orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
