//! Live backend: forwards operations to the remote API over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::api::envelope::Envelope;
use crate::api::operation::Operation;
use crate::api::{ApiError, Backend};
use crate::session::{TokenStore, ACCESS_TOKEN_KEY};

const GENERIC_API_ERROR: &str = "An error occurred";

/// HTTP client for the remote API.
///
/// Reads the access token from the shared token store on every request and
/// attaches it as a bearer header. No retries and no request timeout.
#[derive(Clone)]
pub struct LiveBackend {
    client: Client,
    base_url: String,
    tokens: Option<Arc<dyn TokenStore>>,
}

impl LiveBackend {
    pub fn new(base_url: &str, tokens: Option<Arc<dyn TokenStore>>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The persisted access token, if a store is attached and holds one.
    fn access_token(&self) -> Option<String> {
        let store = self.tokens.as_ref()?;
        match store.read(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read access token, sending request without it: {e}");
                None
            }
        }
    }

    /// Default headers followed by caller headers. A caller header replaces
    /// the default of the same name; repeated caller values are all kept.
    fn request_headers(&self, extra: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.access_token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored access token is not a valid header value; omitting it"),
            }
        }

        for name in extra.keys() {
            headers.remove(name);
        }
        for (name, value) in extra {
            headers.append(name.clone(), value.clone());
        }
        headers
    }

    /// Sends the operation and returns the raw status and JSON body,
    /// whatever the status. The body is parsed as JSON unconditionally.
    pub async fn forward(
        &self,
        operation: &Operation,
        extra_headers: &HeaderMap,
    ) -> Result<(StatusCode, Value), ApiError> {
        let url = format!("{}{}", self.base_url, operation.path());
        let mut builder = self
            .client
            .request(operation.method(), &url)
            .headers(self.request_headers(extra_headers));

        if let Some(body) = operation.body() {
            builder = builder.json(&body);
        }

        let result = async {
            let response = builder.send().await?;
            let status = response.status();
            let body: Value = response.json().await?;
            Ok::<_, reqwest::Error>((status, body))
        }
        .await;

        match result {
            Ok((status, body)) => {
                debug!("{} {} -> {}", operation.method(), url, status);
                Ok((status, body))
            }
            Err(e) => {
                error!("API request failed: {} {}: {e}", operation.method(), url);
                Err(ApiError::Http(e))
            }
        }
    }
}

#[async_trait]
impl Backend for LiveBackend {
    async fn dispatch(
        &self,
        operation: &Operation,
        headers: &HeaderMap,
    ) -> Result<Envelope<Value>, ApiError> {
        let (status, body) = self.forward(operation, headers).await?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(GENERIC_API_ERROR)
                .to_string();
            error!("API request failed: {status}: {message}");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(body).map_err(|e| {
            error!("API response is not an envelope: {e}");
            ApiError::Parse(e)
        })
    }

    fn is_mock(&self) -> bool {
        false
    }
}
