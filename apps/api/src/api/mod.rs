//! Request dispatcher — the single entry point for every backend call.
//!
//! `ApiClient` exposes typed methods; each builds an `Operation` and hands it
//! to the backend chosen once at construction: `MockBackend` (fixtures) or
//! `LiveBackend` (HTTP with bearer-token attachment).

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use thiserror::Error;

pub mod client;
pub mod dashboard;
pub mod envelope;
pub mod fixtures;
pub mod live;
pub mod mock;
pub mod operation;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::ApiClient;
pub use dashboard::DashboardStats;
pub use envelope::Envelope;
pub use live::LiveBackend;
pub use mock::MockBackend;
pub use operation::Operation;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A source of API answers. Implement this to swap where responses come
/// from without touching `ApiClient` or its callers.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn dispatch(
        &self,
        operation: &Operation,
        headers: &HeaderMap,
    ) -> Result<Envelope<Value>, ApiError>;

    fn is_mock(&self) -> bool;
}
