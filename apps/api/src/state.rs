use crate::api::LiveBackend;
use crate::auth::CredentialsProvider;
use crate::config::{ApiMode, Config};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub credentials: CredentialsProvider,
    /// Remote API the auth endpoints forward to. `None` in mock mode.
    pub upstream: Option<LiveBackend>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let credentials = CredentialsProvider::new(&config.api_mode);
        let upstream = match &config.api_mode {
            ApiMode::Mock => None,
            ApiMode::Live { base_url } => Some(LiveBackend::new(base_url, None)),
        };
        Self {
            config,
            credentials,
            upstream,
        }
    }
}
