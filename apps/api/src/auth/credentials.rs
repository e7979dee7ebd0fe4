//! Email/password authorization behind the sign-in flow.

use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::api::fixtures::{mock_user, DEMO_USER, MOCK_ACCESS_TOKEN, MOCK_REFRESH_TOKEN};
use crate::api::{LiveBackend, Operation};
use crate::config::ApiMode;
use crate::session::{Session, SessionUser};

/// Turns credentials into a session, or `None` when they are rejected.
///
/// The demo identity is always accepted; anything else goes to the remote
/// API in live mode and is rejected in mock mode. Callers never learn why a
/// rejection happened.
#[derive(Clone)]
pub struct CredentialsProvider {
    upstream: Option<LiveBackend>,
}

impl CredentialsProvider {
    pub fn new(mode: &ApiMode) -> Self {
        let upstream = match mode {
            ApiMode::Mock => None,
            ApiMode::Live { base_url } => Some(LiveBackend::new(base_url, None)),
        };
        Self { upstream }
    }

    pub async fn authorize(&self, email: &str, password: &str) -> Option<Session> {
        if email.is_empty() || password.is_empty() {
            return None;
        }

        let email_match =
            email.trim().to_lowercase() == DEMO_USER.email.trim().to_lowercase();
        let password_match = password == DEMO_USER.password;
        debug!(email_match, password_match, "Credentials sign-in attempt");

        if email_match && password_match {
            return Some(demo_session());
        }

        let upstream = self.upstream.as_ref()?;
        let operation = Operation::Login {
            email: email.to_string(),
            password: password.to_string(),
        };

        match upstream.forward(&operation, &HeaderMap::new()).await {
            Ok((status, body)) if status.is_success() => session_from_login(&body),
            Ok((status, _)) => {
                debug!("Upstream login rejected with {status}");
                None
            }
            Err(e) => {
                error!("Auth error: {e}");
                None
            }
        }
    }
}

fn demo_session() -> Session {
    let user = mock_user();
    Session {
        user: SessionUser {
            id: user.id,
            name: user.name,
            email: user.email,
            subscription_status: Some(user.subscription_status.as_str().to_string()),
        },
        access_token: Some(MOCK_ACCESS_TOKEN.to_string()),
        refresh_token: Some(MOCK_REFRESH_TOKEN.to_string()),
    }
}

/// Reads `{ data: { user, accessToken, refreshToken } }`; both the user and
/// the access token must be present.
fn session_from_login(body: &Value) -> Option<Session> {
    let data = body.get("data")?;
    let user = data.get("user")?;
    let access_token = data.get("accessToken")?.as_str()?;

    let text = |field: &str| user.get(field).and_then(Value::as_str).map(str::to_string);
    let id = match user.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => {
            warn!("Login response user has no usable id");
            return None;
        }
    };

    Some(Session {
        user: SessionUser {
            id,
            name: text("name").unwrap_or_default(),
            email: text("email").unwrap_or_default(),
            subscription_status: text("subscriptionStatus"),
        },
        access_token: Some(access_token.to_string()),
        refresh_token: data
            .get("refreshToken")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
