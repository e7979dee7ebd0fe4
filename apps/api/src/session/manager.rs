use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::auth::CredentialsProvider;
use crate::session::{Session, SessionListener};

/// Owns the current session and tells listeners about every change.
pub struct SessionManager {
    credentials: CredentialsProvider,
    current: RwLock<Option<Session>>,
    listeners: Vec<Arc<dyn SessionListener>>,
}

impl SessionManager {
    pub fn new(credentials: CredentialsProvider) -> Self {
        Self {
            credentials,
            current: RwLock::new(None),
            listeners: Vec::new(),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Authorizes the credentials and, on success, makes the result the
    /// active session. A rejected sign-in leaves the current session alone.
    pub async fn sign_in(&self, email: &str, password: &str) -> Option<Session> {
        let session = self.credentials.authorize(email, password).await?;
        info!("Signed in as {}", session.user.id);
        self.replace(Some(session.clone()));
        Some(session)
    }

    pub fn sign_out(&self) {
        info!("Signed out");
        self.replace(None);
    }

    /// Listeners run under the write guard so their side effects land in
    /// the same order as the session changes. They must not call back into
    /// the manager.
    fn replace(&self, session: Option<Session>) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = session;
        for listener in &self.listeners {
            listener.session_changed(current.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures::{DEMO_USER, MOCK_ACCESS_TOKEN};
    use crate::config::ApiMode;
    use crate::session::{MemoryTokenStore, TokenStore, TokenSynchronizer, ACCESS_TOKEN_KEY};
    use std::sync::{mpsc, Mutex};
    use std::time::Duration;

    fn manager_with_store() -> (SessionManager, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::default());
        let manager = SessionManager::new(CredentialsProvider::new(&ApiMode::Mock))
            .with_listener(Arc::new(TokenSynchronizer::new(store.clone())));
        (manager, store)
    }

    #[tokio::test]
    async fn test_sign_in_persists_token() {
        let (manager, store) = manager_with_store();
        let session = manager
            .sign_in(DEMO_USER.email, DEMO_USER.password)
            .await
            .unwrap();

        assert_eq!(manager.current(), Some(session));
        assert_eq!(
            store.read(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some(MOCK_ACCESS_TOKEN)
        );
    }

    #[tokio::test]
    async fn test_sign_out_clears_token() {
        let (manager, store) = manager_with_store();
        manager.sign_in(DEMO_USER.email, DEMO_USER.password).await;
        manager.sign_out();

        assert_eq!(manager.current(), None);
        assert_eq!(store.read(ACCESS_TOKEN_KEY).unwrap(), None);
    }

    /// Stalls sign-out notifications so a sign-in can race against them.
    struct SlowSignOut {
        inner: TokenSynchronizer,
        entered: Mutex<mpsc::Sender<()>>,
    }

    impl SessionListener for SlowSignOut {
        fn session_changed(&self, session: Option<&Session>) {
            if session.is_none() {
                if let Ok(entered) = self.entered.lock() {
                    entered.send(()).ok();
                }
                std::thread::sleep(Duration::from_millis(200));
            }
            self.inner.session_changed(session);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_store_follows_last_change_when_sign_out_races_sign_in() {
        let store = Arc::new(MemoryTokenStore::default());
        let (entered_tx, entered_rx) = mpsc::channel();
        let manager = Arc::new(
            SessionManager::new(CredentialsProvider::new(&ApiMode::Mock)).with_listener(
                Arc::new(SlowSignOut {
                    inner: TokenSynchronizer::new(store.clone()),
                    entered: Mutex::new(entered_tx),
                }),
            ),
        );

        let signing_out = {
            let manager = manager.clone();
            std::thread::spawn(move || manager.sign_out())
        };
        entered_rx.recv().unwrap();

        manager.sign_in(DEMO_USER.email, DEMO_USER.password).await;
        signing_out.join().unwrap();

        let current_token = manager.current().and_then(|s| s.access_token);
        assert_eq!(current_token.as_deref(), Some(MOCK_ACCESS_TOKEN));
        assert_eq!(store.read(ACCESS_TOKEN_KEY).unwrap(), current_token);
    }

    #[tokio::test]
    async fn test_rejected_sign_in_keeps_existing_session() {
        let (manager, store) = manager_with_store();
        manager.sign_in(DEMO_USER.email, DEMO_USER.password).await;

        assert!(manager.sign_in(DEMO_USER.email, "wrong").await.is_none());
        assert!(manager.current().is_some());
        assert_eq!(
            store.read(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some(MOCK_ACCESS_TOKEN)
        );
    }
}
