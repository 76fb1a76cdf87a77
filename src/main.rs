use eventpro_client::{
    ApiClient, Session,
    config::{ClientConfig, Env},
    store::{FileSessionStore, StoreState},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Demo entry point: initializes configuration and logging, restores any
/// persisted session, runs the startup verification, and reports the
/// resulting session state plus the upcoming events visible to it.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading
    dotenv::dotenv().ok();
    let config = ClientConfig::load();

    // 2. Logging Filter Setup
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eventpro_client=debug".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!(api = %config.api_base_url, "EventPro client starting");

    // 4. Session Store, Gateway, and Session Manager wiring
    let store: StoreState = Arc::new(FileSessionStore::new(config.storage_dir.clone()));
    let api = Arc::new(ApiClient::new(&config, store.clone()).await);
    let session = Session::new(api.clone(), store);

    // 5. Startup Verification
    session.initialize().await;

    match session.current_user() {
        Some(user) => {
            tracing::info!(name = %user.name, role = %user.role, "signed in");
        }
        None => {
            tracing::info!("no valid stored session; browsing as visitor");
        }
    }

    // 6. Public data smoke check
    match api.get_upcoming_events().await {
        Ok(events) => {
            tracing::info!(count = events.len(), "upcoming events");
            for event in events {
                tracing::info!(id = event.id, title = %event.title, date = %event.date, "event");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch events");
        }
    }
}
