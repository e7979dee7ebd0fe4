use std::sync::Arc;

use tracing::{debug, warn};

use crate::session::store::{TokenStore, ACCESS_TOKEN_KEY};
use crate::session::{Session, SessionListener};

/// Mirrors the active session's access token into the token store.
///
/// One direction only: the store never feeds back into the session.
#[derive(Clone)]
pub struct TokenSynchronizer {
    store: Option<Arc<dyn TokenStore>>,
}

impl TokenSynchronizer {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A synchronizer with no reachable store; every change is a no-op.
    pub fn detached() -> Self {
        Self { store: None }
    }

    /// Writes the session's token, or clears the key when the session is
    /// anonymous or carries no token.
    pub fn sync(&self, session: Option<&Session>) {
        let Some(store) = &self.store else {
            return;
        };

        let token = session
            .and_then(|s| s.access_token.as_deref())
            .filter(|t| !t.is_empty());

        let result = match token {
            Some(token) => {
                debug!("Persisting access token");
                store.write(ACCESS_TOKEN_KEY, token)
            }
            None => {
                debug!("Clearing persisted access token");
                store.remove(ACCESS_TOKEN_KEY)
            }
        };

        if let Err(e) = result {
            warn!("Token sync failed: {e}");
        }
    }
}

impl SessionListener for TokenSynchronizer {
    fn session_changed(&self, session: Option<&Session>) {
        self.sync(session);
    }
}
