use crate::search::filters::FilterError;
use crate::store::StoreError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid search filters: {0}")]
    InvalidFilters(#[from] FilterError),
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
    #[error("malformed path: {0}")]
    MalformedPath(#[from] PathRejection),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("part not found: `{0}`")]
    PartNotFound(Uuid),
    #[error("too many requests")]
    RateLimited,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidFilters(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::MalformedBody(e) => (e.status(), e.body_text()),
            Self::MalformedPath(e) => (e.status(), e.body_text()),
            Self::PartNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("part not found or not listed: `{id}`"),
            ),
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests, slow down".to_string(),
            ),
            Self::Store(e) => {
                error!(store_error = ?e, "marketplace query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        (status, ApiJson(ErrorResponse { message })).into_response()
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    message: String,
}

/// JSON extractor and response whose rejections surface as [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections surface as [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

impl<T> IntoResponse for ApiJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
