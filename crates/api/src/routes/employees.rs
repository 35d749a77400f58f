//! Employee endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{Employee, EmployeePatch, InboundOrdersPerEmployee};
use store::Store;

use crate::error::ApiError;
use crate::extract::{Data, JsonBody, ReportQuery, created, ok, parse_id};
use crate::state::AppState;

pub fn router<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route("/reportInboundOrders", get(inbound_orders_report::<S>))
        .route(
            "/{id}",
            get(find::<S>).patch(update::<S>).delete(delete::<S>),
        )
}

/// GET /employees
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<Employee>>>, ApiError> {
    Ok(ok(state.employees.list().await?))
}

/// GET /employees/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<Employee>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.employees.get(id).await?))
}

/// POST /employees
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<EmployeePatch>,
) -> Result<(StatusCode, Json<Data<Employee>>), ApiError> {
    let employee = state.employees.create(patch.into_new()?).await?;
    Ok(created(employee))
}

/// PATCH /employees/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<EmployeePatch>,
) -> Result<Json<Data<Employee>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.employees.update(id, patch).await?))
}

/// DELETE /employees/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /employees/reportInboundOrders?id=
#[tracing::instrument(skip(state))]
pub async fn inbound_orders_report<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Data<Vec<InboundOrdersPerEmployee>>>, ApiError> {
    let id = query.anchor()?;
    Ok(ok(state.employees.inbound_orders_report(id).await?))
}
