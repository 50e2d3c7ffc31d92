use crate::domain::SearchResponse;
use crate::error::{ApiError, ApiJson, ErrorResponse};
use crate::search::filters::SearchFilters;
use crate::AppState;
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    post,
    path = "/marketplace/search",
    tag = "marketplace search",
    request_body = SearchFilters,
    responses(
        (status = 200, description = "Returns a page of listed parts with facet counts", body = SearchResponse),
        (status = 400, description = "Returns an error when the filters are invalid or the body is not json", body = ErrorResponse),
        (status = 415, description = "Returns an error when the body is not declared as json", body = ErrorResponse),
        (status = 422, description = "Returns an error when the body does not match the filter schema", body = ErrorResponse),
        (status = 429, description = "Returns an error when the client is rate limited", body = ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    ApiJson(filters): ApiJson<SearchFilters>,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = crate::search::search(state.store.as_ref(), filters).await?;
    Ok(Json(response))
}
