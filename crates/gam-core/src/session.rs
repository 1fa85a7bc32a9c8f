// ── Session store ──

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;

use crate::model::User;

/// Who is logged in, if anyone.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn {
        user: User,
    },
    /// A persisted session id exists but the server has not confirmed
    /// it yet this process.
    Resuming {
        username: String,
    },
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::LoggedOut => None,
            SessionState::LoggedIn { user } => Some(&user.username),
            SessionState::Resuming { username } => Some(username),
        }
    }
}

/// Holds the active session and broadcasts state changes. The opaque
/// session id lives here (wrapped in [`SecretString`]); persistence of
/// that id across processes is the config layer's job.
pub struct SessionStore {
    session_id: std::sync::RwLock<Option<SecretString>>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::LoggedOut);
        Self {
            session_id: std::sync::RwLock::new(None),
            state,
        }
    }

    /// Seed from a persisted session before the server confirms it.
    pub fn resume(&self, session_id: SecretString, username: String) {
        if let Ok(mut slot) = self.session_id.write() {
            *slot = Some(session_id);
        }
        self.state.send_replace(SessionState::Resuming { username });
    }

    /// Record a confirmed login.
    pub fn establish(&self, session_id: SecretString, user: User) {
        if let Ok(mut slot) = self.session_id.write() {
            *slot = Some(session_id);
        }
        self.state.send_replace(SessionState::LoggedIn { user });
    }

    /// Promote a resumed session once the server has confirmed it.
    pub fn confirm(&self, user: User) {
        self.state.send_replace(SessionState::LoggedIn { user });
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.session_id.write() {
            *slot = None;
        }
        self.state.send_replace(SessionState::LoggedOut);
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn has_session(&self) -> bool {
        self.session_id
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Expose the session id for persistence. `None` when logged out.
    pub fn session_id(&self) -> Option<String> {
        self.session_id
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|s| s.expose_secret().to_owned()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn operator() -> User {
        User {
            id: 1,
            username: "admin".into(),
            privilege: 15,
            enabled: true,
            session_timeout_secs: None,
        }
    }

    #[test]
    fn login_logout_cycle() {
        let store = SessionStore::new();
        assert!(!store.state().is_logged_in());

        store.establish(SecretString::from("s-1"), operator());
        assert!(store.state().is_logged_in());
        assert_eq!(store.state().username(), Some("admin"));
        assert_eq!(store.session_id().as_deref(), Some("s-1"));

        store.clear();
        assert!(!store.has_session());
        assert!(store.session_id().is_none());
    }

    #[test]
    fn resume_then_confirm() {
        let store = SessionStore::new();
        store.resume(SecretString::from("s-9"), "admin".into());
        assert!(!store.state().is_logged_in());
        assert!(store.has_session());

        store.confirm(operator());
        assert!(store.state().is_logged_in());
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();
        store.establish(SecretString::from("s-2"), operator());
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_logged_in());
    }
}
