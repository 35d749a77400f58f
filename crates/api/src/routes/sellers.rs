//! Seller endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{Id, Seller, SellerPatch};
use serde::Serialize;
use store::Store;

use crate::error::ApiError;
use crate::extract::{Data, JsonBody, created, ok, parse_id};
use crate::state::AppState;

pub fn router<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route(
            "/reportSellers",
            get(super::localities::sellers_report::<S>),
        )
        .route(
            "/{id}",
            get(find::<S>).patch(update::<S>).delete(delete::<S>),
        )
}

/// Body of a successful seller creation.
#[derive(Debug, Serialize)]
pub struct SellerCreated {
    pub seller_id: Id,
}

/// GET /sellers
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Data<Vec<Seller>>>, ApiError> {
    Ok(ok(state.sellers.list().await?))
}

/// GET /sellers/{id}
#[tracing::instrument(skip(state))]
pub async fn find<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Data<Seller>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.sellers.get(id).await?))
}

/// POST /sellers
///
/// Answers with the new seller's id only.
#[tracing::instrument(skip(state))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(patch): JsonBody<SellerPatch>,
) -> Result<(StatusCode, Json<Data<SellerCreated>>), ApiError> {
    let seller = state.sellers.create(patch.into_new()?).await?;
    Ok(created(SellerCreated {
        seller_id: seller.id,
    }))
}

/// PATCH /sellers/{id}
#[tracing::instrument(skip(state))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<SellerPatch>,
) -> Result<Json<Data<Seller>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(ok(state.sellers.update(id, patch).await?))
}

/// DELETE /sellers/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.sellers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
