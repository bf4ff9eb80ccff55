use contracts::system::auth::SessionUser;
use leptos::prelude::*;

use super::storage::{self, LocalStorage, PersistedSession, SessionStorage, TOKEN_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Persisted storage has not been read yet
    #[default]
    Loading,
    Authenticated,
    Guest,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl SessionState {
    /// A token alone is enough to be authenticated.
    pub fn from_persisted(persisted: PersistedSession) -> Self {
        let status = if persisted.token.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Guest
        };
        Self {
            status,
            token: persisted.token,
            user: persisted.user,
        }
    }
}

/// Session store shared through context.
///
/// Created in `App`, lives for the whole page lifetime. Every mutation writes
/// through to `localStorage` first and then updates the signal.
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: RwSignal<SessionState>,
    /// Only notifies when the status itself changes, not on user edits
    status: Memo<SessionStatus>,
}

impl SessionContext {
    pub fn new() -> Self {
        let state = RwSignal::new(SessionState::default());
        Self {
            state,
            status: Memo::new(move |_| state.with(|s| s.status)),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status.get()
    }

    pub fn is_loading(&self) -> bool {
        self.status() == SessionStatus::Loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.state.with(|s| s.user.clone())
    }

    /// Token straight from storage, not tracked.
    pub fn token(&self) -> Option<String> {
        LocalStorage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn login(&self, token: &str, user: SessionUser) {
        storage::persist(&LocalStorage, token, &user);
        log::info!("Logged in as {}", user.username);
        self.state.set(SessionState {
            status: SessionStatus::Authenticated,
            token: Some(token.to_string()),
            user: Some(user),
        });
    }

    pub fn logout(&self) {
        storage::clear(&LocalStorage);
        log::info!("Logged out");
        self.state.set(SessionState {
            status: SessionStatus::Guest,
            ..Default::default()
        });
    }

    /// Re-reads the persisted session.
    pub fn refresh_user(&self) {
        let state = SessionState::from_persisted(storage::restore(&LocalStorage));
        log::debug!("Session restored: {:?}", state.status);
        self.state.set(state);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::memory::MemoryStorage;
    use crate::system::auth::storage::USER_KEY;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn user(name: &str) -> SessionUser {
        SessionUser {
            id: Some(1),
            username: name.to_string(),
            first_name: None,
            last_name: None,
            email: None,
        }
    }

    #[test]
    fn token_alone_authenticates() {
        let storage = MemoryStorage::default();
        storage.set(TOKEN_KEY, "abc");
        storage.set(USER_KEY, "garbage");
        let state = SessionState::from_persisted(storage::restore(&storage));
        assert_eq!(state.status, SessionStatus::Authenticated);
        assert_eq!(state.user, None);
    }

    #[test]
    fn empty_storage_is_guest() {
        let state = SessionState::from_persisted(storage::restore(&MemoryStorage::default()));
        assert_eq!(state.status, SessionStatus::Guest);
        assert_eq!(state.token, None);
    }

    #[test]
    fn status_readers_ignore_user_only_changes() {
        let owner = Owner::new();
        owner.set();

        let session = SessionContext::new();
        session.state.set(SessionState {
            status: SessionStatus::Authenticated,
            token: Some("abc".into()),
            user: Some(user("jan")),
        });

        let runs = Arc::new(AtomicUsize::new(0));
        let _effect = ImmediateEffect::new({
            let runs = Arc::clone(&runs);
            move || {
                let _ = session.status();
                runs.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        session.state.set(SessionState {
            status: SessionStatus::Authenticated,
            token: Some("abc".into()),
            user: Some(user("janek")),
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(session.user().map(|u| u.username), Some("janek".to_string()));

        session.state.set(SessionState {
            status: SessionStatus::Guest,
            ..Default::default()
        });
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
