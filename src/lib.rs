//! Client SDK for the EventPro event-management API.
//!
//! The crate is organized leaf-first around four components:
//!
//! - [`store`] — durable persistence of the bearer token and cached user
//!   record (the browser-local-storage analogue);
//! - [`api`] — the API gateway: every HTTP call goes through
//!   [`api::ApiClient`], which injects the auth header and normalizes all
//!   failures into [`error::ApiError`];
//! - [`session`] — the session manager: startup verification,
//!   login/register/logout/update flows, derived role booleans, and change
//!   notifications;
//! - [`guard`] — the pure access-guard decision function for protected
//!   views.
//!
//! No component bypasses this chain: the guard reads session snapshots, the
//! session drives the gateway, and the gateway owns the token store.

// --- Module Structure ---

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod session;
pub mod store;

// --- Public Re-exports ---

pub use api::ApiClient;
pub use config::{ClientConfig, Env};
pub use error::ApiError;
pub use guard::{RouteDecision, evaluate, has_access};
pub use models::{Event, EventStatus, Role, User};
pub use session::{Session, SessionSnapshot};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoreState};
