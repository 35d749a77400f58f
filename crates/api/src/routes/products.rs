//! Product endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{Product, ProductPatch, ProductRecordsReport};
use store::Store;

use crate::error::ApiError;
use crate::extract::{Data, JsonBody, ReportQuery, created, ok, parse_id};
use crate::state::AppState;

pub fn router<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route("/reportRecords", get(records_report::<S>))
        .route(
            "/{id}",
            get(find::<S>).patch(update::<S>).delete(delete::<S>),
        )
}

/// GET /products
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<Product>>>, ApiError> {
    Ok(ok(state.products.list().await?))
}

/// GET /products/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<Product>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.products.get(id).await?))
}

/// POST /products
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<ProductPatch>,
) -> Result<(StatusCode, Json<Data<Product>>), ApiError> {
    let product = state.products.create(patch.into_new()?).await?;
    Ok(created(product))
}

/// PATCH /products/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ProductPatch>,
) -> Result<Json<Data<Product>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.products.update(id, patch).await?))
}

/// DELETE /products/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /products/reportRecords?id=
#[tracing::instrument(skip(state))]
pub async fn records_report<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Data<Vec<ProductRecordsReport>>>, ApiError> {
    let id = query.anchor()?;
    Ok(ok(state.products.records_report(id).await?))
}
