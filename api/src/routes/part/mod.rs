use crate::domain::PartListing;
use crate::error::{ApiError, ApiPath, ErrorResponse};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/parts/{id}",
    tag = "part by id",
    params(
        ("id" = Uuid, Path, description = "The id of the part")
    ),
    responses(
        (status = 200, description = "Returns a listed part with vehicle and seller", body = PartListing),
        (status = 400, description = "Returns an error when the id is not a uuid", body = ErrorResponse),
        (status = 404, description = "Returns an error when the part does not exist or is not listed", body = ErrorResponse)
    )
)]
pub async fn by_id(
    ApiPath(id): ApiPath<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<PartListing>, ApiError> {
    let listing = crate::search::listing(state.store.as_ref(), id).await?;
    Ok(Json(listing))
}
