use contracts::system::auth::SessionUser;
use web_sys::window;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Key/value store the session is persisted in.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`. Every call is a no-op when storage is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// What was read back from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

/// Reads token and user. A corrupt user entry is logged and dropped; the token
/// is kept.
pub fn restore(storage: &impl SessionStorage) -> PersistedSession {
    let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
    let user = storage
        .get(USER_KEY)
        .and_then(|raw| match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::error!("Failed to parse stored user: {}", e);
                None
            }
        });
    PersistedSession { token, user }
}

pub fn persist(storage: &impl SessionStorage, token: &str, user: &SessionUser) {
    storage.set(TOKEN_KEY, token);
    match serde_json::to_string(user) {
        Ok(json) => storage.set(USER_KEY, &json),
        Err(e) => log::error!("Failed to serialize user: {}", e),
    }
}

pub fn clear(storage: &impl SessionStorage) {
    storage.remove(TOKEN_KEY);
    storage.remove(USER_KEY);
}

#[cfg(test)]
pub(crate) mod memory {
    use super::SessionStorage;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct MemoryStorage(RefCell<HashMap<String, String>>);

    impl SessionStorage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStorage;
    use super::*;

    fn jan() -> SessionUser {
        SessionUser {
            id: Some(7),
            username: "jan".into(),
            ..Default::default()
        }
    }

    #[test]
    fn persist_then_restore() {
        let storage = MemoryStorage::default();
        persist(&storage, "abc", &jan());
        let session = restore(&storage);
        assert_eq!(session.token.as_deref(), Some("abc"));
        assert_eq!(session.user, Some(jan()));
    }

    #[test]
    fn corrupt_user_keeps_token() {
        let storage = MemoryStorage::default();
        storage.set(TOKEN_KEY, "abc");
        storage.set(USER_KEY, "{not json");
        let session = restore(&storage);
        assert_eq!(session.token.as_deref(), Some("abc"));
        assert_eq!(session.user, None);
    }

    #[test]
    fn clear_removes_both_keys() {
        let storage = MemoryStorage::default();
        persist(&storage, "abc", &jan());
        clear(&storage);
        assert_eq!(restore(&storage), PersistedSession::default());
    }
}
