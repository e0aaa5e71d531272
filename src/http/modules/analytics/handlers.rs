//! Analytics API handlers (dashboard panels 2-4)
//!
//! All endpoints are stateless projections of the static dataset.

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use super::dto::*;
use crate::domain::{find_platform, PLATFORMS};
use crate::http::common::ApiResponse;

// ── Query params ───────────────────────────────────────────────

/// Platform pair for the comparison chart.
#[derive(Debug, Deserialize)]
pub struct ComparisonParams {
    /// First platform name (exact).
    pub first: String,
    /// Second platform name (exact).
    pub second: String,
}

// ── 2. Engagement comparison ───────────────────────────────────

/// Engagement comparison bar chart.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/engagement",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Engagement per platform", body = ApiResponse<EngagementResponse>)
    )
)]
pub async fn engagement_comparison() -> Json<ApiResponse<EngagementResponse>> {
    let bars = PLATFORMS
        .iter()
        .map(|row| EngagementBar {
            platform: row.platform.to_string(),
            engagement: row.engagement,
        })
        .collect();

    Json(ApiResponse::success(EngagementResponse { bars }))
}

// ── 3. Growth trend ────────────────────────────────────────────

/// Growth trend line chart, in the dataset's fixed order.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/growth",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Growth per platform", body = ApiResponse<GrowthResponse>)
    )
)]
pub async fn growth_trend() -> Json<ApiResponse<GrowthResponse>> {
    let points = PLATFORMS
        .iter()
        .map(|row| GrowthPoint {
            platform: row.platform.to_string(),
            growth: row.growth,
        })
        .collect();

    Json(ApiResponse::success(GrowthResponse { points }))
}

// ── 4a. Data insights ──────────────────────────────────────────

/// Users-vs-engagement scatter plus user-distribution pie.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/insights",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Scatter and pie series", body = ApiResponse<InsightsResponse>)
    )
)]
pub async fn data_insights() -> Json<ApiResponse<InsightsResponse>> {
    let scatter = PLATFORMS
        .iter()
        .map(|row| ScatterPoint {
            platform: row.platform.to_string(),
            users: row.users,
            engagement: row.engagement,
            growth: row.growth,
        })
        .collect();

    let total_users: u32 = PLATFORMS.iter().map(|row| row.users).sum();
    let pie = PLATFORMS
        .iter()
        .map(|row| PieSlice {
            platform: row.platform.to_string(),
            users: row.users,
            share_percent: 100.0 * f64::from(row.users) / f64::from(total_users),
        })
        .collect();

    Json(ApiResponse::success(InsightsResponse { scatter, pie }))
}

// ── 4b. Pairwise comparison ────────────────────────────────────

/// Compare engagement and growth for two platforms.
///
/// Selecting the same platform twice, or a name not in the dataset,
/// yields a null comparison rather than an error.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/comparison",
    tag = "Dashboard",
    params(
        ("first" = String, Query, description = "First platform name"),
        ("second" = String, Query, description = "Second platform name")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Grouped comparison series, or null", body = ApiResponse<ComparisonResponse>)
    )
)]
pub async fn platform_comparison(
    Query(params): Query<ComparisonParams>,
) -> Json<ApiResponse<ComparisonResponse>> {
    let comparison = build_comparison(&params.first, &params.second);
    Json(ApiResponse::success(ComparisonResponse { comparison }))
}

fn build_comparison(first: &str, second: &str) -> Option<ComparisonChart> {
    if first == second {
        return None;
    }
    let a = find_platform(first)?;
    let b = find_platform(second)?;

    let entries = [a, b]
        .into_iter()
        .map(|row| ComparisonEntry {
            platform: row.platform.to_string(),
            engagement: row.engagement,
            growth: row.growth,
        })
        .collect();

    Some(ComparisonChart {
        title: format!("Comparison Between {} & {}", a.platform, b.platform),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn engagement_bars_cover_all_platforms_in_order() {
        let Json(response) = engagement_comparison().await;
        let bars = response.data.unwrap().bars;
        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0].platform, "Facebook");
        assert_eq!(bars[0].engagement, 85);
        assert_eq!(bars[9].platform, "WhatsApp");
    }

    #[tokio::test]
    async fn growth_points_keep_dataset_order() {
        let Json(response) = growth_trend().await;
        let points = response.data.unwrap().points;
        let order: Vec<_> = points.iter().map(|p| p.platform.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "Facebook", "Instagram", "Twitter", "LinkedIn", "Snapchat",
                "TikTok", "YouTube", "Pinterest", "Reddit", "WhatsApp",
            ]
        );
    }

    #[tokio::test]
    async fn pie_shares_sum_to_one_hundred() {
        let Json(response) = data_insights().await;
        let data = response.data.unwrap();
        assert_eq!(data.scatter.len(), 10);

        let total: f64 = data.pie.iter().map(|s| s.share_percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn comparison_contains_exactly_the_two_platforms() {
        let chart = build_comparison("Facebook", "Instagram").unwrap();
        assert_eq!(chart.entries.len(), 2);
        assert_eq!(chart.entries[0].platform, "Facebook");
        assert_eq!(chart.entries[0].engagement, 85);
        assert_eq!(chart.entries[0].growth, 5);
        assert_eq!(chart.entries[1].platform, "Instagram");
        assert_eq!(chart.entries[1].engagement, 92);
        assert_eq!(chart.entries[1].growth, 12);
        assert_eq!(chart.title, "Comparison Between Facebook & Instagram");
    }

    #[test]
    fn identical_selection_yields_no_chart() {
        assert!(build_comparison("Facebook", "Facebook").is_none());
    }

    #[test]
    fn unknown_platform_degrades_to_no_chart() {
        assert!(build_comparison("Facebook", "MySpace").is_none());
    }
}
