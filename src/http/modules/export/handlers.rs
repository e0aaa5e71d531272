//! Dataset export handler (dashboard panel 5)

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::dataset_csv;
use crate::http::common::ApiResponse;

const EXPORT_FILENAME: &str = "social_media_data.csv";

/// Download the full dataset as CSV.
///
/// Columns: `Platform,Users,Engagement,Growth`. Re-parsing the artifact
/// yields exactly the static dataset.
#[utoipa::path(
    get,
    path = "/api/v1/export/csv",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV attachment with all 10 rows", body = String, content_type = "text/csv")
    )
)]
pub async fn export_csv() -> Response {
    match dataset_csv() {
        Ok(csv_text) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILENAME}\""),
                ),
            ],
            csv_text,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}
