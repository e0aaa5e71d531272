//! Platform search data transfer objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PlatformRow;

/// One platform row as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformDto {
    /// Platform name
    pub platform: String,
    /// Monthly active users, in thousands
    pub users: u32,
    /// Engagement rate, percent
    pub engagement: u32,
    /// Year-over-year growth, percent
    pub growth: u32,
}

impl From<PlatformRow> for PlatformDto {
    fn from(row: PlatformRow) -> Self {
        Self {
            platform: row.platform.to_string(),
            users: row.users,
            engagement: row.engagement,
            growth: row.growth,
        }
    }
}

/// Search query for the platform list.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive substring of the platform name. Empty or absent
    /// matches every row.
    pub search: Option<String>,
}

/// Filtered platform list.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformListResponse {
    pub platforms: Vec<PlatformDto>,
    /// Number of matching rows
    pub total: usize,
}
