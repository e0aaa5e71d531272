//! The static platform dataset.
//!
//! Ten rows of social-media platform statistics, compiled into the binary
//! and never mutated at runtime. Every dashboard panel is a projection of
//! this table.

use super::DomainError;

/// One row of the platform statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRow {
    /// Platform name, unique within the dataset.
    pub platform: &'static str,
    /// Monthly active users, in thousands.
    pub users: u32,
    /// Engagement rate, percent.
    pub engagement: u32,
    /// Year-over-year growth, percent.
    pub growth: u32,
}

/// The full dataset, in its fixed display order.
pub const PLATFORMS: [PlatformRow; 10] = [
    PlatformRow { platform: "Facebook", users: 2900, engagement: 85, growth: 5 },
    PlatformRow { platform: "Instagram", users: 1500, engagement: 92, growth: 12 },
    PlatformRow { platform: "Twitter", users: 330, engagement: 70, growth: 3 },
    PlatformRow { platform: "LinkedIn", users: 310, engagement: 60, growth: 4 },
    PlatformRow { platform: "Snapchat", users: 500, engagement: 88, growth: 8 },
    PlatformRow { platform: "TikTok", users: 1200, engagement: 95, growth: 25 },
    PlatformRow { platform: "YouTube", users: 2300, engagement: 90, growth: 10 },
    PlatformRow { platform: "Pinterest", users: 450, engagement: 65, growth: 6 },
    PlatformRow { platform: "Reddit", users: 430, engagement: 72, growth: 4 },
    PlatformRow { platform: "WhatsApp", users: 2300, engagement: 91, growth: 9 },
];

/// Case-insensitive substring filter over platform names.
///
/// An empty query matches every row.
pub fn filter_platforms(query: &str) -> Vec<PlatformRow> {
    let needle = query.to_lowercase();
    PLATFORMS
        .iter()
        .filter(|row| row.platform.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

/// Exact-name lookup, used by the pairwise comparison panel.
pub fn find_platform(name: &str) -> Option<PlatformRow> {
    PLATFORMS.iter().find(|row| row.platform == name).copied()
}

/// Serialize the full dataset as CSV with columns
/// `Platform,Users,Engagement,Growth`.
pub fn dataset_csv() -> Result<String, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Platform", "Users", "Engagement", "Growth"])?;
    for row in PLATFORMS {
        writer.write_record([
            row.platform.to_string(),
            row.users.to_string(),
            row.engagement.to_string(),
            row.growth.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DomainError::Storage(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DomainError::Storage(e.to_string()))
}
