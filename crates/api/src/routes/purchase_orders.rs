//! Purchase order endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{PurchaseOrder, PurchaseOrderPatch};
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

/// GET /purchase-orders
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<PurchaseOrder>>>, ApiError> {
    Ok(ok(state.purchase_orders.list().await?))
}

/// GET /purchase-orders/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<PurchaseOrder>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.purchase_orders.get(id).await?))
}

/// POST /purchase-orders
///
/// Missing fields answer 422; an `order_date` other than `YYYY-MM-DD` answers 400.
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<PurchaseOrderPatch>,
) -> Result<(StatusCode, Json<Data<PurchaseOrder>>), ApiError> {
    let order = state.purchase_orders.create(patch.into_new()?).await?;
    Ok(created(order))
}

/// PATCH /purchase-orders/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<PurchaseOrderPatch>,
) -> Result<Json<Data<PurchaseOrder>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.purchase_orders.update(id, patch).await?))
}

/// DELETE /purchase-orders/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.purchase_orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
