use crate::rate_limit::RateLimiter;
use crate::store::PartStore;
use common::config::RateLimit;
use std::sync::Arc;
use utoipa::OpenApi;

pub mod domain;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod search;
pub mod store;

#[cfg(test)]
mod test_support;

#[derive(OpenApi)]
#[openapi(paths(
    crate::routes::search::search,
    crate::routes::part::by_id,
    crate::routes::meta::health
))]
pub struct Docs;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PartStore>,
}

/// Full application router over `store`, rate limited according to `rate_limit`.
pub fn app(store: Arc<dyn PartStore>, rate_limit: &RateLimit) -> axum::Router {
    let limiter = RateLimiter::from_config(rate_limit).map(Arc::new);
    routes::router(AppState { store }, limiter)
}
