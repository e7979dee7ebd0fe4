//! Folio data-access layer: the API client that serves the resume and
//! portfolio screens from fixtures or a remote backend, the session token
//! mirroring it depends on, and the auth endpoints of the web tier.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;

pub use api::{ApiClient, ApiError, Envelope, Operation};
pub use config::{ApiMode, ClientConfig, Config};
pub use session::{SessionManager, TokenStore, TokenSynchronizer};
