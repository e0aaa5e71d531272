//! Authentication API handlers
//!
//! Signup and login validate against the user store; a successful login
//! issues a JWT session token. Logout is an acknowledgement only: tokens
//! are stateless, so "logging out" is the client discarding its token.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::auth::{create_token, AuthenticatedUser, JwtConfig};
use crate::http::common::{ApiResponse, ValidatedJson};
use crate::store::UserStore;

/// Auth state for authentication handlers
#[derive(Clone)]
pub struct AuthHandlerState {
    pub store: Arc<dyn UserStore>,
    pub jwt_config: JwtConfig,
}

/// Log in
///
/// Validates the credentials against the user store and returns a JWT
/// session token. Both fields are compared after trimming surrounding
/// whitespace, case-sensitively.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, returns a session token", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    let authenticated = state
        .store
        .authenticate(&request.username, &request.password)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    if !authenticated {
        metrics::counter!("pulseboard_logins_total", "outcome" => "failure").increment(1);
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid username or password")),
        ));
    }

    let username = request.username.trim().to_string();
    let token = create_token(&username, &state.jwt_config).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    metrics::counter!("pulseboard_logins_total", "outcome" => "success").increment(1);
    info!(%username, "user logged in");

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: UserInfo { username },
    })))
}

/// Sign up
///
/// Creates a new user record. The username must be unique after trimming;
/// signup does not log the user in. The duplicate check and the write are
/// not atomic across processes.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, please log in", body = ApiResponse<UserInfo>),
        (status = 409, description = "Username already exists"),
        (status = 422, description = "Validation error (empty or oversized fields)")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), (StatusCode, Json<ApiResponse<UserInfo>>)> {
    let username = request.username.trim();
    if username.is_empty() || request.password.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error("Username and password must not be blank")),
        ));
    }

    let taken = state.store.exists(username).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    if taken {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Username already exists! Try another one.")),
        ));
    }

    state
        .store
        .append(username, &request.password)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    metrics::counter!("pulseboard_signups_total").increment(1);
    info!(%username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserInfo {
            username: username.to_string(),
        })),
    ))
}

/// Current user
///
/// Returns the user identified by the presented session token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_current_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::success(UserInfo {
        username: user.username,
    }))
}

/// Log out
///
/// Session tokens are stateless, so there is nothing to clear server-side;
/// the client discards its token after this acknowledgement.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<UserInfo>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn logout(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<UserInfo>> {
    info!(username = %user.username, "user logged out");
    Json(ApiResponse::success(UserInfo {
        username: user.username,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    use crate::store::CsvUserStore;

    fn app(dir: &tempfile::TempDir) -> Router {
        let state = AuthHandlerState {
            store: Arc::new(CsvUserStore::new(dir.path().join("users.csv"))),
            jwt_config: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                issuer: "pulseboard".to_string(),
            },
        };
        Router::new()
            .route("/api/v1/auth/register", post(register))
            .route("/api/v1/auth/login", post(login))
            .with_state(state)
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn signup_then_login_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let response = app
            .clone()
            .oneshot(json_post(
                "/api/v1/auth/register",
                r#"{"username": " alice ", "password": "hunter2"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_post(
                "/api/v1/auth/login",
                r#"{"username": "alice", "password": "hunter2"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["username"], "alice");
        assert_eq!(body["data"]["token_type"], "Bearer");
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected_and_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let first = app
            .clone()
            .oneshot(json_post(
                "/api/v1/auth/register",
                r#"{"username": "alice", "password": "one"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        // Same username with surrounding whitespace still counts as taken.
        let second = app
            .oneshot(json_post(
                "/api/v1/auth/register",
                r#"{"username": " alice ", "password": "two"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);

        let store = CsvUserStore::new(dir.path().join("users.csv"));
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bad_credentials_are_401() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let response = app
            .oneshot(json_post(
                "/api/v1/auth/login",
                r#"{"username": "nobody", "password": "nothing"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn blank_username_is_422() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let response = app
            .oneshot(json_post(
                "/api/v1/auth/register",
                r#"{"username": "   ", "password": "pw"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
