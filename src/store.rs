use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::fs;

use crate::models::User;

/// Fixed storage key for the bearer token.
const TOKEN_KEY: &str = "eventpro_token";
/// Fixed storage key for the cached user record.
const USER_KEY: &str = "eventpro_user";

// 1. SessionStore Contract

/// SessionStore
///
/// Abstract contract for the persisted client state: at most one bearer
/// token and at most one cached user record, stored under two fixed keys.
/// The trait lets us swap the durable file-backed implementation for the
/// in-memory one during testing without touching the gateway or session
/// layers.
///
/// Storage failures never propagate: writes are logged and dropped, reads
/// degrade to `None`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the persisted bearer token, if any.
    async fn token(&self) -> Option<String>;

    /// Persists the token, or removes the persisted value when `None`.
    async fn set_token(&self, token: Option<&str>);

    /// Returns the cached user record, if any.
    async fn user(&self) -> Option<User>;

    /// Persists the user record, or removes it when `None`.
    async fn set_user(&self, user: Option<&User>);

    /// Removes both keys. Called on logout and on failed startup
    /// verification so the token and user always disappear together.
    async fn clear(&self) {
        self.set_token(None).await;
        self.set_user(None).await;
    }
}

/// The concrete type used to share the session store across the client.
pub type StoreState = Arc<dyn SessionStore>;

// 2. The Durable Implementation (one file per key)

/// FileSessionStore
///
/// File-backed store writing one file per key under a configured directory.
/// This is the crate's analogue of the browser's per-origin local storage:
/// it survives process restarts on the same machine.
#[derive(Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Some(contents),
            Err(_) => None,
        }
    }

    async fn write_key(&self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir).await {
            tracing::error!(key, error = %e, "failed to create session storage directory");
            return;
        }
        if let Err(e) = fs::write(self.path_for(key), value).await {
            tracing::error!(key, error = %e, "failed to persist session key");
        }
    }

    async fn remove_key(&self, key: &str) {
        // Missing file and removed file are the same outcome.
        let _ = fs::remove_file(self.path_for(key)).await;
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn token(&self) -> Option<String> {
        self.read_key(TOKEN_KEY).await.filter(|t| !t.is_empty())
    }

    async fn set_token(&self, token: Option<&str>) {
        match token {
            Some(token) => self.write_key(TOKEN_KEY, token).await,
            None => self.remove_key(TOKEN_KEY).await,
        }
    }

    async fn user(&self) -> Option<User> {
        let raw = self.read_key(USER_KEY).await?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                // A corrupt record is treated as absent; the startup
                // verification will rebuild or clear it.
                tracing::warn!(error = %e, "discarding unreadable cached user record");
                None
            }
        }
    }

    async fn set_user(&self, user: Option<&User>) {
        match user {
            Some(user) => match serde_json::to_string(user) {
                Ok(raw) => self.write_key(USER_KEY, &raw).await,
                Err(e) => tracing::error!(error = %e, "failed to serialize user record"),
            },
            None => self.remove_key(USER_KEY).await,
        }
    }
}

// 3. The In-Memory Implementation (For Tests)

/// MemorySessionStore
///
/// In-memory `SessionStore` used by unit and integration tests. Lets the
/// session and gateway layers be exercised without touching the
/// filesystem, and allows tests to pre-seed a persisted token/user pair.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
    user: Mutex<Option<User>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the store, simulating state left behind by a previous run.
    pub fn seeded(token: &str, user: &User) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            user: Mutex::new(Some(user.clone())),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    async fn set_token(&self, token: Option<&str>) {
        *self.token.lock().unwrap() = token.map(str::to_string);
    }

    async fn user(&self) -> Option<User> {
        self.user.lock().unwrap().clone()
    }

    async fn set_user(&self, user: Option<&User>) {
        *self.user.lock().unwrap() = user.cloned();
    }
}
