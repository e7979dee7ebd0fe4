//! Axum route handlers for registration and credentials sign-in.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use reqwest::header::HeaderMap;
use serde::{de::DeserializeOwned, Deserialize};

use crate::api::fixtures::{registered_user, MOCK_ACCESS_TOKEN, MOCK_REFRESH_TOKEN};
use crate::api::{Envelope, Operation};
use crate::errors::AppError;
use crate::models::{AuthPayload, User};
use crate::session::Session;
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Parses the body as JSON whatever the `Content-Type` says. Malformed JSON
/// is an unexpected failure and surfaces as a 500 with the parser message.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/auth/register
///
/// Validates the sign-up form, then answers from fixtures (mock mode) or
/// relays the upstream status and body unchanged (live mode).
pub async fn handle_register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: RegisterRequest = parse_json(&body)?;

    let (Some(name), Some(email), Some(password)) = (
        present(request.name),
        present(request.email),
        present(request.password),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }

    let Some(upstream) = &state.upstream else {
        let user = User {
            id: format!("user-{}", Utc::now().timestamp_millis()),
            ..registered_user(&name, &email)
        };
        let envelope = Envelope::ok(AuthPayload {
            user,
            access_token: MOCK_ACCESS_TOKEN.to_string(),
            refresh_token: MOCK_REFRESH_TOKEN.to_string(),
        })
        .with_message("User registered successfully");

        return Ok((StatusCode::CREATED, Json(envelope)).into_response());
    };

    let operation = Operation::Register {
        name,
        email,
        password,
    };
    let (status, body) = upstream.forward(&operation, &HeaderMap::new()).await?;
    let status = StatusCode::from_u16(status.as_u16())
        .map_err(|e| anyhow::anyhow!("Upstream returned an invalid status: {e}"))?;

    Ok((status, Json(body)).into_response())
}

/// POST /api/auth/login
///
/// Credentials sign-in. Rejections never say which part was wrong.
pub async fn handle_login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Session>, AppError> {
    let request: LoginRequest = parse_json(&body)?;
    let email = present(request.email).unwrap_or_default();
    let password = present(request.password).unwrap_or_default();

    state
        .credentials
        .authorize(&email, &password)
        .await
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures::DEMO_USER;
    use crate::api::test_server::spawn;
    use crate::config::{ApiMode, Config};
    use crate::routes::build_router;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        Router,
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(api_mode: ApiMode) -> Router {
        build_router(AppState::new(Config {
            api_mode,
            mock_delay: Duration::ZERO,
            port: 0,
            rust_log: "info".to_string(),
        }))
    }

    async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        send(
            app,
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let (status, body) = post(
            app(ApiMode::Mock),
            "/api/auth/register",
            r#"{"name":"Alice","email":"a@x.com","password":"short"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Password must be at least 8 characters long" })
        );
    }

    #[tokio::test]
    async fn test_validation_applies_without_content_type() {
        let (status, body) = send(
            app(ApiMode::Mock),
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .body(Body::from(
                    r#"{"name":"Alice","email":"a@x.com","password":"short"}"#,
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Password must be at least 8 characters long" })
        );
    }

    #[tokio::test]
    async fn test_registration_accepts_plain_text_content_type() {
        let (status, body) = send(
            app(ApiMode::Mock),
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("content-type", "text/plain;charset=UTF-8")
                .body(Body::from(
                    r#"{"name":"Alice","email":"a@x.com","password":"longenough"}"#,
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["user"]["name"], "Alice");
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let (status, body) = post(
            app(ApiMode::Mock),
            "/api/auth/register",
            r#"{"name":"","email":"a@x.com","password":"longenough"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing required fields" }));

        let (status, _) = post(
            app(ApiMode::Mock),
            "/api/auth/register",
            r#"{"email":"a@x.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mock_registration_created() {
        let (status, body) = post(
            app(ApiMode::Mock),
            "/api/auth/register",
            r#"{"name":"Alice","email":"a@x.com","password":"longenough"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User registered successfully");
        assert_eq!(body["data"]["user"]["name"], "Alice");
        assert_eq!(body["data"]["user"]["email"], "a@x.com");
        assert_eq!(body["data"]["user"]["subscription_status"], "premium");
        assert!(body["data"]["user"]["id"]
            .as_str()
            .unwrap()
            .starts_with("user-"));
        assert_eq!(body["data"]["accessToken"], MOCK_ACCESS_TOKEN);
    }

    #[tokio::test]
    async fn test_malformed_json_is_server_error() {
        let (status, body) = post(app(ApiMode::Mock), "/api/auth/register", "{not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_live_registration_mirrors_upstream() {
        let server = spawn(409, json!({ "success": false, "error": "Email already in use" })).await;
        let (status, body) = post(
            app(ApiMode::Live {
                base_url: server.base_url.clone(),
            }),
            "/api/auth/register",
            r#"{"name":"Alice","email":"a@x.com","password":"longenough"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "success": false, "error": "Email already in use" }));

        let recorded = server.last().await;
        assert_eq!(recorded.path, "/auth/register");
        assert_eq!(
            recorded.body,
            json!({ "name": "Alice", "email": "a@x.com", "password": "longenough" })
        );
    }

    #[tokio::test]
    async fn test_live_registration_unreachable_upstream() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (status, body) = post(
            app(ApiMode::Live {
                base_url: format!("http://{addr}"),
            }),
            "/api/auth/register",
            r#"{"name":"Alice","email":"a@x.com","password":"longenough"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("HTTP error"));
    }

    #[tokio::test]
    async fn test_login_demo_returns_session() {
        let body = json!({ "email": DEMO_USER.email, "password": DEMO_USER.password }).to_string();
        let (status, session) = post(app(ApiMode::Mock), "/api/auth/login", &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["user"]["id"], DEMO_USER.id);
        assert_eq!(session["accessToken"], MOCK_ACCESS_TOKEN);
        assert!(session.get("refreshToken").is_none());
    }

    #[tokio::test]
    async fn test_login_malformed_body_is_json_error() {
        let (status, body) = post(app(ApiMode::Mock), "/api/auth/login", "{\"email\":").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_login_without_content_type() {
        let (status, session) = send(
            app(ApiMode::Mock),
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .body(Body::from(
                    json!({ "email": DEMO_USER.email, "password": DEMO_USER.password })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["accessToken"], MOCK_ACCESS_TOKEN);
    }

    #[tokio::test]
    async fn test_login_rejection_is_uniform() {
        let body = json!({ "email": DEMO_USER.email, "password": "nope" }).to_string();
        let (status, error) = post(app(ApiMode::Mock), "/api/auth/login", &body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error, json!({ "error": "Invalid credentials" }));
    }
}
