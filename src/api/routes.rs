//! HTTP API route definitions.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{health, root};
use crate::metrics;

/// Create the API router.
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route_layer(middleware::from_fn(track_metrics))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Record latency and count for every matched route.
async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;
    metrics::record_http_request(start, &path, response.status().as_u16());

    response
}
