//! Authentication middleware for Axum
//!
//! Verifies the bearer token and injects an [`AuthenticatedUser`] into
//! request extensions, so every protected handler sees an explicit
//! request-scoped auth context instead of a global session flag.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::jwt::{verify_token, AuthError, Claims, JwtConfig};

/// Authentication state containing the JWT config
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated user information extracted from a valid token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub username: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            username: claims.sub,
        }
    }
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware - requires valid token
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }

            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);

            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Create an authentication error response
fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}
