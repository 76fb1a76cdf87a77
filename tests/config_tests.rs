use eventpro_client::config::{ClientConfig, Env};
use serial_test::serial;
use std::{env, panic, path::PathBuf};

// --- Setup/Teardown Utilities ---

/// Runs a test closure and restores the touched environment variables
/// afterward, so env-driven tests cannot leak into each other.
fn run_with_env<T, R>(test: T, cleanup_vars: Vec<&'static str>) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_production_fails_fast_without_api_url() {
    let result = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::remove_var("EVENTPRO_API_URL");
            }
            panic::catch_unwind(ClientConfig::load)
        },
        vec!["APP_ENV", "EVENTPRO_API_URL"],
    );

    assert!(
        result.is_err(),
        "Production config loading should panic when EVENTPRO_API_URL is missing"
    );
}

#[test]
#[serial]
fn test_local_env_defaults() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::remove_var("EVENTPRO_API_URL");
                env::remove_var("EVENTPRO_STORAGE_DIR");
            }
            ClientConfig::load()
        },
        vec!["APP_ENV", "EVENTPRO_API_URL", "EVENTPRO_STORAGE_DIR"],
    );

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.api_base_url, "http://localhost:8000/api");
}

#[test]
#[serial]
fn test_explicit_overrides_win() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("EVENTPRO_API_URL", "https://api.eventpro.example/api");
                env::set_var("EVENTPRO_STORAGE_DIR", "/var/lib/eventpro");
            }
            ClientConfig::load()
        },
        vec!["APP_ENV", "EVENTPRO_API_URL", "EVENTPRO_STORAGE_DIR"],
    );

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.api_base_url, "https://api.eventpro.example/api");
    assert_eq!(config.storage_dir, PathBuf::from("/var/lib/eventpro"));
}

#[test]
#[serial]
fn test_unknown_app_env_falls_back_to_local() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "staging");
                env::remove_var("EVENTPRO_API_URL");
            }
            ClientConfig::load()
        },
        vec!["APP_ENV", "EVENTPRO_API_URL"],
    );

    assert_eq!(config.env, Env::Local);
}
