//! Prediction API data transfer objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Prediction request. The UI bounds the inputs; the model itself does not.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "engagement": 80,
    "growth": 5
}))]
pub struct PredictRequest {
    /// Engagement rate, percent (0-100)
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub engagement: u32,
    /// Growth rate, percent (0-50)
    #[validate(range(min = 0, max = 50, message = "must be between 0 and 50"))]
    pub growth: u32,
}

/// Predicted user count for one input pair.
#[derive(Debug, Serialize, ToSchema)]
pub struct PredictResponse {
    /// Echoed engagement input
    pub engagement: u32,
    /// Echoed growth input
    pub growth: u32,
    /// Raw model output, thousands of users
    pub predicted_users: f64,
    /// Rounded output with thousands separators, e.g. "1,775"
    pub predicted_users_display: String,
}

/// Predicted-vs-actual point of the fitted line overlay.
#[derive(Debug, Serialize, ToSchema)]
pub struct OverlayPoint {
    pub platform: String,
    /// Observed engagement, the overlay's x axis
    pub engagement: u32,
    /// Observed users
    pub users: u32,
    /// Model output at this row's (engagement, growth)
    pub predicted_users: f64,
}

/// Fitted model details plus the overlay series.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelResponse {
    /// Coefficients for (engagement, growth), in that order
    pub coefficients: Vec<f64>,
    /// Bias term
    pub intercept: f64,
    /// Predicted users at each observed row, for display against actuals
    pub overlay: Vec<OverlayPoint>,
}

/// Round to the nearest integer and group digits with commas, the way the
/// prediction panel displays user counts.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(format_thousands(430.0), "430");
        assert_eq!(format_thousands(1775.59), "1,776");
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
        assert_eq!(format_thousands(0.2), "0");
    }

    #[test]
    fn keeps_sign_on_negative_values() {
        assert_eq!(format_thousands(-4146.86), "-4,147");
    }
}
