//! Prediction API handlers (dashboard panel 6)
//!
//! The model is re-fit from the static dataset on every request. That is
//! deliberate: fitting is a pure function of an immutable table, so there
//! is no cache to invalidate and nothing to persist.

use axum::http::StatusCode;
use axum::Json;

use super::dto::{format_thousands, ModelResponse, OverlayPoint, PredictRequest, PredictResponse};
use crate::analytics::LinearModel;
use crate::domain::PLATFORMS;
use crate::http::common::{ApiResponse, ValidatedJson};

/// Predict users
///
/// Projects a user count for one (engagement, growth) pair using ordinary
/// least squares over the full dataset.
#[utoipa::path(
    post,
    path = "/api/v1/prediction",
    tag = "Prediction",
    request_body = PredictRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Predicted user count", body = ApiResponse<PredictResponse>),
        (status = 422, description = "Inputs outside the allowed ranges")
    )
)]
pub async fn predict_users(
    ValidatedJson(request): ValidatedJson<PredictRequest>,
) -> Result<Json<ApiResponse<PredictResponse>>, (StatusCode, Json<ApiResponse<PredictResponse>>)> {
    let model = fit_model()?;
    let predicted = model.predict(f64::from(request.engagement), f64::from(request.growth));

    Ok(Json(ApiResponse::success(PredictResponse {
        engagement: request.engagement,
        growth: request.growth,
        predicted_users: predicted,
        predicted_users_display: format_thousands(predicted),
    })))
}

/// Model details
///
/// Returns the fitted coefficients and intercept, plus the fitted-line
/// overlay: predicted users at each observed row, for display against the
/// actual values.
#[utoipa::path(
    get,
    path = "/api/v1/prediction/model",
    tag = "Prediction",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Model coefficients and overlay", body = ApiResponse<ModelResponse>)
    )
)]
pub async fn model_details(
) -> Result<Json<ApiResponse<ModelResponse>>, (StatusCode, Json<ApiResponse<ModelResponse>>)> {
    let model = fit_model()?;

    let overlay = PLATFORMS
        .iter()
        .map(|row| OverlayPoint {
            platform: row.platform.to_string(),
            engagement: row.engagement,
            users: row.users,
            predicted_users: model.predict(f64::from(row.engagement), f64::from(row.growth)),
        })
        .collect();

    Ok(Json(ApiResponse::success(ModelResponse {
        coefficients: model.coefficients.to_vec(),
        intercept: model.intercept,
        overlay,
    })))
}

fn fit_model<T>() -> Result<LinearModel, (StatusCode, Json<ApiResponse<T>>)> {
    LinearModel::fit(&PLATFORMS).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })
}
