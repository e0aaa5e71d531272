//! Analytics API data transfer objects
//!
//! Each response carries the series a chart front-end would render; no
//! rendering happens server-side.

use serde::Serialize;
use utoipa::ToSchema;

// ── Engagement (bar chart) ─────────────────────────────────────

/// One bar of the engagement comparison chart.
#[derive(Debug, Serialize, ToSchema)]
pub struct EngagementBar {
    pub platform: String,
    /// Engagement rate, percent.
    pub engagement: u32,
}

/// Engagement comparison response.
#[derive(Debug, Serialize, ToSchema)]
pub struct EngagementResponse {
    /// One bar per platform, in dataset order.
    pub bars: Vec<EngagementBar>,
}

// ── Growth (line chart) ────────────────────────────────────────

/// One point of the growth trend line.
#[derive(Debug, Serialize, ToSchema)]
pub struct GrowthPoint {
    pub platform: String,
    /// Year-over-year growth, percent.
    pub growth: u32,
}

/// Growth trend response, ordered by the dataset's fixed order.
#[derive(Debug, Serialize, ToSchema)]
pub struct GrowthResponse {
    pub points: Vec<GrowthPoint>,
}

// ── Insights (scatter + pie) ───────────────────────────────────

/// One marker of the users-vs-engagement scatter; growth doubles as the
/// marker size.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScatterPoint {
    pub platform: String,
    pub users: u32,
    pub engagement: u32,
    pub growth: u32,
}

/// One slice of the user-distribution pie.
#[derive(Debug, Serialize, ToSchema)]
pub struct PieSlice {
    pub platform: String,
    pub users: u32,
    /// This platform's share of all users, percent.
    pub share_percent: f64,
}

/// Data insights response (panel 4, left and right columns).
#[derive(Debug, Serialize, ToSchema)]
pub struct InsightsResponse {
    pub scatter: Vec<ScatterPoint>,
    pub pie: Vec<PieSlice>,
}

// ── Pairwise comparison ────────────────────────────────────────

/// Engagement and growth values for one side of the comparison.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComparisonEntry {
    pub platform: String,
    pub engagement: u32,
    pub growth: u32,
}

/// Grouped bar chart comparing two platforms.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComparisonChart {
    /// Chart title, e.g. "Comparison Between Facebook & Instagram".
    pub title: String,
    pub entries: Vec<ComparisonEntry>,
}

/// Comparison response. `comparison` is null when the two selections are
/// identical or unknown: no chart, no error.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComparisonResponse {
    pub comparison: Option<ComparisonChart>,
}
