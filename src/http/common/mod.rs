//! Shared HTTP plumbing: the response envelope and validated extractors.

mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response envelope.
///
/// Every REST endpoint wraps its payload in this shape.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
