//! Section endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{ReportProduct, Section, SectionPatch};
use store::Store;

use crate::error::ApiError;
use crate::extract::{Data, JsonBody, ReportQuery, created, ok, parse_id};
use crate::state::AppState;

pub fn router<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route("/reportProducts", get(products_report::<S>))
        .route(
            "/{id}",
            get(find::<S>).patch(update::<S>).delete(delete::<S>),
        )
}

/// GET /sections
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<Section>>>, ApiError> {
    Ok(ok(state.sections.list().await?))
}

/// GET /sections/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<Section>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.sections.get(id).await?))
}

/// POST /sections
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<SectionPatch>,
) -> Result<(StatusCode, Json<Data<Section>>), ApiError> {
    let section = state.sections.create(patch.into_new()?).await?;
    Ok(created(section))
}

/// PATCH /sections/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<SectionPatch>,
) -> Result<Json<Data<Section>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.sections.update(id, patch).await?))
}

/// DELETE /sections/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.sections.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /sections/reportProducts?id=
#[tracing::instrument(skip(state))]
pub async fn products_report<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Data<Vec<ReportProduct>>>, ApiError> {
    let id = query.anchor()?;
    Ok(ok(state.sections.products_report(id).await?))
}
