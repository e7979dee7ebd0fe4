//! Session state on the client side and the token mirroring around it.

use serde::{Deserialize, Serialize};

pub mod manager;
pub mod store;
pub mod sync;

pub use manager::SessionManager;
pub use store::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore, ACCESS_TOKEN_KEY};
pub use sync::TokenSynchronizer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<String>,
}

/// An authenticated session as exposed to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Kept server-side only; never serialized to the client.
    #[serde(default, skip_serializing)]
    pub refresh_token: Option<String>,
}

/// Callback invoked by the auth subsystem whenever the session changes.
/// `None` means signed out.
pub trait SessionListener: Send + Sync {
    fn session_changed(&self, session: Option<&Session>);
}
