//! Buyer endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{Buyer, BuyerPatch, PurchaseOrdersByBuyer};
use store::Store;

use crate::error::ApiError;
use crate::extract::{Data, JsonBody, ReportQuery, created, ok, parse_id};
use crate::state::AppState;

pub fn router<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route("/report-purchase-orders", get(purchase_orders_report::<S>))
        .route(
            "/{id}",
            get(find::<S>).patch(update::<S>).delete(delete::<S>),
        )
}

/// GET /buyers
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<Buyer>>>, ApiError> {
    Ok(ok(state.buyers.list().await?))
}

/// GET /buyers/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<Buyer>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.buyers.get(id).await?))
}

/// POST /buyers
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<BuyerPatch>,
) -> Result<(StatusCode, Json<Data<Buyer>>), ApiError> {
    let buyer = state.buyers.create(patch.into_new()?).await?;
    Ok(created(buyer))
}

/// PATCH /buyers/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<BuyerPatch>,
) -> Result<Json<Data<Buyer>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.buyers.update(id, patch).await?))
}

/// DELETE /buyers/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.buyers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /buyers/report-purchase-orders?id=
#[tracing::instrument(skip(state))]
pub async fn purchase_orders_report<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Data<Vec<PurchaseOrdersByBuyer>>>, ApiError> {
    let id = query.anchor()?;
    Ok(ok(state.buyers.purchase_orders_report(id).await?))
}
