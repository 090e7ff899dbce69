use anyhow::Result;
use bcrypt::{DEFAULT_COST, hash, verify};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{Level, event, instrument};

use crate::models::user::{StoredUser, User, UserRole};
use crate::storage::{
    key_value::{JsonStoreExt, KeyValueStore},
    storage_keys::{USER_KEY, USERS_KEY},
};

/// Lowest bcrypt cost accepted by `hash_password`
pub const MIN_HASH_COST: u32 = 4;

/// Registration and sign-in against the persisted `users` list
#[derive(Debug)]
pub struct AuthStore {
    store: Arc<dyn KeyValueStore>,
    hash_cost: u32,
    /// Serializes read-modify-write sequences on the `users` key
    write_lock: Mutex<()>,
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

impl AuthStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            hash_cost: DEFAULT_COST,
            write_lock: Mutex::new(()),
        }
    }

    /// Override the bcrypt cost (tests use [`MIN_HASH_COST`])
    pub fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.hash_cost = hash_cost;
        self
    }

    fn users(&self) -> Vec<StoredUser> {
        self.store.read_json_vec::<StoredUser>(USERS_KEY)
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users()
            .into_iter()
            .find(|u| u.user.email == email)
            .map(|u| u.to_user())
    }

    pub fn find_by_id(&self, id: &str) -> Option<User> {
        self.users()
            .into_iter()
            .find(|u| u.user.id == id)
            .map(|u| u.to_user())
    }

    /// Check the credentials without touching the session
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let found = self.users().into_iter().find(|u| u.user.email == email)?;
        match verify_password(password, &found.password_hash) {
            Ok(true) => Some(found.to_user()),
            Ok(false) => None,
            Err(e) => {
                event!(Level::ERROR, "Error verifying password for {email}: {e:?}");
                None
            }
        }
    }

    /// Sign in and persist the session user
    ///
    /// Returns `None` for an unknown email or a wrong password
    #[instrument(level = "debug", skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Option<User> {
        let user = self.authenticate(email, password)?;
        if let Err(e) = self.store.write_json(USER_KEY, &user) {
            event!(Level::ERROR, "Error saving the session user: {e:?}");
            return None;
        }
        Some(user)
    }

    /// Create an account and sign it in
    ///
    /// Returns `Ok(None)` when the email is already registered
    #[instrument(level = "debug", skip(self, password))]
    pub fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: UserRole,
    ) -> Result<Option<User>> {
        if self.find_by_email(email).is_some() {
            tracing::debug!("Email {email} is already registered");
            return Ok(None);
        }
        // hashing is slow so it stays outside the lock
        let password_hash = hash_password(password, self.hash_cost)?;

        let _guard = self.write_lock.lock();
        let mut users = self.users();
        if users.iter().any(|u| u.user.email == email) {
            tracing::debug!("Email {email} is already registered");
            return Ok(None);
        }

        let user = User {
            id: format!("user_{}", uuid::Uuid::new_v4().simple()),
            email: email.to_string(),
            full_name: full_name.to_string(),
            role,
        };
        users.push(StoredUser {
            user: user.clone(),
            password_hash,
        });
        self.store.write_json(USERS_KEY, &users)?;
        self.store.write_json(USER_KEY, &user)?;
        Ok(Some(user))
    }

    /// Forget the session user
    pub fn logout(&self) -> Result<()> {
        self.store.remove_item(USER_KEY)
    }

    /// The session user restored from storage
    pub fn current_user(&self) -> Option<User> {
        self.store.read_json::<User>(USER_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{file_store::FileStore, memory_store::MemoryStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_auth_store() -> (Arc<MemoryStore>, AuthStore) {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthStore::new(store.clone()).with_hash_cost(MIN_HASH_COST);
        (store, auth)
    }

    #[test]
    fn test_register_then_login() -> Result<()> {
        let (_store, auth) = make_auth_store();
        let user = auth
            .register("petrova@example.ru", "secret", "Петрова Анна", UserRole::Hr)?
            .unwrap();
        assert!(user.id.starts_with("user_"));
        assert_eq!(auth.current_user(), Some(user.clone()));

        auth.logout()?;
        assert!(auth.current_user().is_none());

        let logged_in = auth.login("petrova@example.ru", "secret").unwrap();
        assert_eq!(logged_in, user);
        assert_eq!(auth.current_user(), Some(user));
        Ok(())
    }

    #[test]
    fn test_register_rejects_duplicate_email() -> Result<()> {
        let (store, auth) = make_auth_store();
        let first = auth
            .register("boss@example.ru", "first", "Сидоров Пётр", UserRole::Manager)?
            .unwrap();
        let users_before = store.get_item(USERS_KEY)?;

        let second = auth.register("boss@example.ru", "second", "Другой", UserRole::Employee)?;
        assert!(second.is_none());
        assert_eq!(store.get_item(USERS_KEY)?, users_before);

        // the original password still works and the new one does not
        assert_eq!(auth.login("boss@example.ru", "first"), Some(first));
        assert!(auth.login("boss@example.ru", "second").is_none());
        Ok(())
    }

    #[test]
    fn test_login_failures_do_not_error() -> Result<()> {
        let (_store, auth) = make_auth_store();
        assert!(auth.login("nobody@example.ru", "secret").is_none());
        auth.register("worker@example.ru", "secret", "Козлов", UserRole::Employee)?;
        auth.logout()?;
        assert!(auth.login("worker@example.ru", "wrong").is_none());
        assert!(auth.login("WORKER@example.ru", "secret").is_none());
        assert!(auth.current_user().is_none());
        Ok(())
    }

    #[test]
    fn test_passwords_are_not_stored_in_plain_text() -> Result<()> {
        let (store, auth) = make_auth_store();
        let user = auth
            .register("admin@example.ru", "p@ssw0rd", "Админ", UserRole::Admin)?
            .unwrap();
        let raw = store.get_item(USERS_KEY)?.unwrap();
        assert!(!raw.contains("p@ssw0rd"));
        assert!(!store.get_item(USER_KEY)?.unwrap().contains("passwordHash"));
        assert_eq!(auth.find_by_id(&user.id), Some(user.clone()));
        assert_eq!(auth.find_by_email("admin@example.ru"), Some(user));
        Ok(())
    }

    #[test]
    fn test_broken_users_list_is_treated_as_empty() -> Result<()> {
        let (store, auth) = make_auth_store();
        store.set_item(USERS_KEY, "[{\"broken\"")?;
        assert!(auth.login("a@example.ru", "x").is_none());
        assert!(
            auth.register("a@example.ru", "x", "А", UserRole::Specialist)?
                .is_some()
        );
        Ok(())
    }

    #[test]
    fn test_concurrent_logins_on_file_store() -> Result<()> {
        let tmp_dir = tempfile::tempdir()?;
        let store = Arc::new(FileStore::open(tmp_dir.path())?);
        let auth = AuthStore::new(store).with_hash_cost(MIN_HASH_COST);
        auth.register("worker@example.ru", "secret", "Козлов", UserRole::Employee)?;

        let rejected = AtomicUsize::new(0);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..20 {
                        if auth.login("worker@example.ru", "secret").is_none() {
                            rejected.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                });
            }
        });
        assert_eq!(rejected.load(Ordering::SeqCst), 0);
        assert_eq!(
            auth.current_user().map(|u| u.email),
            Some("worker@example.ru".to_string())
        );
        tmp_dir.close()?;
        Ok(())
    }

    #[test]
    fn test_register_hashes_with_configured_cost() -> Result<()> {
        let (store, auth) = make_auth_store();
        auth.register("cost@example.ru", "secret", "Цена", UserRole::Hr)?;
        let users = store.read_json_vec::<StoredUser>(USERS_KEY);
        assert!(users[0].password_hash.starts_with("$2b$04$"));
        Ok(())
    }
}
