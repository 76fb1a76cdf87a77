use std::env;
use std::path::PathBuf;

/// ClientConfig
///
/// Holds the client's entire runtime configuration. Immutable once loaded,
/// shared by value between the gateway and the session store.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL every relative endpoint path is appended to.
    pub api_base_url: String,
    /// Directory where the token and cached user record are persisted
    /// between runs.
    pub storage_dir: PathBuf,
    /// Runtime environment marker. Controls the log output format.
    pub env: Env,
}

/// Env
///
/// Runtime context marker, used to switch between human-readable and
/// JSON-structured log output.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for ClientConfig {
    /// Safe, non-panicking configuration for test setup: local API default
    /// and a per-process temp directory for storage.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            storage_dir: env::temp_dir().join("eventpro-client"),
            env: Env::Local,
        }
    }
}

impl ClientConfig {
    /// load
    ///
    /// Canonical startup initialization, reading all parameters from
    /// environment variables.
    ///
    /// # Panics
    /// Panics when `EVENTPRO_API_URL` is missing in production. Local runs
    /// fall back to the development defaults.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let runtime_env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let api_base_url = match runtime_env {
            Env::Production => env::var("EVENTPRO_API_URL")
                .expect("FATAL: EVENTPRO_API_URL must be set in production."),
            Env::Local => env::var("EVENTPRO_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
        };

        let storage_dir = env::var("EVENTPRO_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_storage_dir());

        Self {
            api_base_url,
            storage_dir,
            env: runtime_env,
        }
    }
}

/// Per-user storage location for the persisted session, the analogue of the
/// browser's per-origin local storage.
fn default_storage_dir() -> PathBuf {
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".eventpro")
    } else {
        env::temp_dir().join("eventpro-client")
    }
}
