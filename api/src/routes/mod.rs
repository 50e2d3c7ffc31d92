pub mod meta;
pub mod part;
pub mod search;

use crate::rate_limit::{self, RateLimiter};
use crate::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Marketplace routes sit behind the rate limiter when one is given; health and docs never do.
pub fn router(state: AppState, limiter: Option<Arc<RateLimiter>>) -> Router {
    let marketplace = Router::new()
        .route("/marketplace/search", post(search::search))
        .route("/parts/{id}", get(part::by_id));
    let marketplace = match limiter {
        Some(limiter) => marketplace.layer(from_fn_with_state(limiter, rate_limit::limit)),
        None => marketplace,
    };

    Router::new()
        .merge(marketplace)
        .route("/health", get(meta::health))
        .route("/api-docs/openapi.json", get(meta::openapi))
        .with_state(state)
}
