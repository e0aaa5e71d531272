//! Platform search handlers (dashboard panel 1)

use axum::extract::Query;
use axum::Json;

use super::dto::{PlatformDto, PlatformListResponse, SearchParams};
use crate::domain::filter_platforms;
use crate::http::common::ApiResponse;

/// Search platforms
///
/// Case-insensitive substring filter over platform names. An absent or
/// empty query returns the full dataset; no match returns an empty list,
/// never an error.
#[utoipa::path(
    get,
    path = "/api/v1/platforms",
    tag = "Dashboard",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring of the platform name")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching platform rows", body = ApiResponse<PlatformListResponse>)
    )
)]
pub async fn search_platforms(
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<PlatformListResponse>> {
    let query = params.search.unwrap_or_default();
    let platforms: Vec<PlatformDto> = filter_platforms(&query)
        .into_iter()
        .map(PlatformDto::from)
        .collect();
    let total = platforms.len();

    Json(ApiResponse::success(PlatformListResponse {
        platforms,
        total,
    }))
}
