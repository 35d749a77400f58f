//! HTTP API server for the fresh-products inventory.
//!
//! Every aggregate is served under `/api/v1` with JSON envelopes
//! (`{"data": ...}` on success, the [`error::ApiError`] envelope otherwise),
//! next to `/health` and a Prometheus `/metrics` endpoint.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store>(state: Arc<AppState<S>>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .nest("/api/v1", api_routes::<S>())
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Multi-word collections answer on kebab-case paths and their snake_case aliases.
fn api_routes<S: Store>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .nest("/sellers", routes::sellers::router())
        .nest("/localities", routes::localities::router())
        .nest("/carries", routes::carriers::router())
        .nest("/carriers", routes::carriers::router())
        .nest("/buyers", routes::buyers::router())
        .nest("/employees", routes::employees::router())
        .nest("/warehouses", routes::warehouses::router())
        .nest("/sections", routes::sections::router())
        .nest("/products", routes::products::router())
        .nest("/product-batches", routes::product_batches::router())
        .nest("/product_batches", routes::product_batches::router())
        .nest("/product-records", routes::product_records::router())
        .nest("/product_records", routes::product_records::router())
        .nest("/purchase-orders", routes::purchase_orders::router())
        .nest("/purchase_orders", routes::purchase_orders::router())
        .nest("/inbound-orders", routes::inbound_orders::router())
        .nest("/inbound_orders", routes::inbound_orders::router())
}
