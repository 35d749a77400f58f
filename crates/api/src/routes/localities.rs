//! Locality endpoints and the per-locality reports.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{CarriesCountPerLocality, Locality, LocalityPatch, LocalitySellersCount};
use store::Store;

use crate::error::ApiError;
use crate::extract::{Data, JsonBody, ReportQuery, created, ok, parse_id};
use crate::state::AppState;

pub fn router<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route("/reportSellers", get(sellers_report::<S>))
        .route("/reportCarries", get(carries_report::<S>))
        .route(
            "/{id}",
            get(find::<S>).patch(update::<S>).delete(delete::<S>),
        )
}

/// GET /localities
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<Locality>>>, ApiError> {
    Ok(ok(state.localities.list().await?))
}

/// GET /localities/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<Locality>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.localities.get(id).await?))
}

/// POST /localities
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<LocalityPatch>,
) -> Result<(StatusCode, Json<Data<Locality>>), ApiError> {
    let locality = state.localities.create(patch.into_new()?).await?;
    Ok(created(locality))
}

/// PATCH /localities/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<LocalityPatch>,
) -> Result<Json<Data<Locality>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.localities.update(id, patch).await?))
}

/// DELETE /localities/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.localities.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /localities/reportSellers?id=
///
/// Also served as `/sellers/reportSellers`.
#[tracing::instrument(skip(state))]
pub async fn sellers_report<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Data<Vec<LocalitySellersCount>>>, ApiError> {
    let id = query.anchor()?;
    Ok(ok(state.localities.sellers_report(id).await?))
}

/// GET /localities/reportCarries?id=
#[tracing::instrument(skip(state))]
pub async fn carries_report<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Data<Vec<CarriesCountPerLocality>>>, ApiError> {
    let id = query.anchor()?;
    Ok(ok(state.localities.carries_report(id).await?))
}
