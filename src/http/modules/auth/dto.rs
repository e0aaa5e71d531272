//! Auth API data transfer objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "alice",
    "password": "hunter2"
}))]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub username: String,
    /// Password
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub password: String,
}

/// Successful login response
///
/// Contains the JWT session token for subsequent requests, passed in the
/// `Authorization: Bearer <token>` header.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    pub token: String,
    /// Token type (always `Bearer`)
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    /// Logged-in user
    pub user: UserInfo,
}

/// Information about a user
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// Username
    pub username: String,
}

/// Signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "newuser",
    "password": "hunter2"
}))]
pub struct RegisterRequest {
    /// Desired username (unique after trimming)
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub username: String,
    /// Password (stored as entered)
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub password: String,
}
