use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

use crate::{
    api::ApiClient,
    error::ApiError,
    models::{AuthResponse, Role, User, UserPatch},
    store::StoreState,
};

/// SessionSnapshot
///
/// An immutable view of the session at one point in time: the current user
/// (or `None` for an anonymous visitor) and whether the startup
/// verification is still in flight. This is what subscribers receive on
/// every state change and what the access guard evaluates.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    /// True only during the startup verification window; flips false
    /// exactly once per process.
    pub loading: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionSnapshot {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn is_organizer(&self) -> bool {
        self.role().is_some_and(|r| r.satisfies(Role::Organizer))
    }

    pub fn is_subscriber(&self) -> bool {
        self.role().is_some_and(|r| r.satisfies(Role::Subscriber))
    }
}

/// Session
///
/// The single-instance session manager. It owns the current-user state and
/// is the only component (together with the gateway's token handling) that
/// mutates the persisted session. State changes are broadcast over a watch
/// channel so callers can re-render reactively instead of polling.
///
/// Lifecycle: a fresh session starts in the loading state; `initialize`
/// resolves it to authenticated or anonymous exactly once. After that only
/// `login`/`register` and `logout` move between the two.
pub struct Session {
    api: Arc<ApiClient>,
    store: StoreState,
    state: watch::Sender<SessionSnapshot>,
    initialized: AtomicBool,
}

impl Session {
    pub fn new(api: Arc<ApiClient>, store: StoreState) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            api,
            store,
            state,
            initialized: AtomicBool::new(false),
        }
    }

    /// The current session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// A receiver that yields a new snapshot on every session change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    // --- Lifecycle ---

    /// initialize
    ///
    /// Startup verification, in two sequential phases. When a cached user
    /// record and a token both survive from a previous run, the cached user
    /// is published optimistically (still loading), then `GET /user`
    /// confirms the token: on success the authoritative record replaces the
    /// cached one and is re-persisted; on any error the full logout
    /// sequence runs and the session degrades silently to anonymous. With
    /// nothing cached the session goes straight to anonymous without a
    /// network call.
    ///
    /// Runs at most once; later calls are no-ops, so `loading` flips false
    /// exactly once per process.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }

        let cached_user = self.store.user().await;
        // The gateway primed its token cache from the same store at
        // construction time.
        let token = self.api.token();

        let (Some(cached), Some(_)) = (cached_user, token) else {
            self.publish(None, false);
            return;
        };

        // Phase 1: optimistic. The cached record is shown while the token
        // is being verified.
        self.publish(Some(cached), true);

        // Phase 2: verify.
        match self.api.get_current_user().await {
            Ok(user) => {
                self.store.set_user(Some(&user)).await;
                self.publish(Some(user), false);
            }
            Err(e) => {
                tracing::info!(error = %e, "stored session failed verification; signing out");
                self.api.logout().await;
                self.store.set_user(None).await;
                self.publish(None, false);
            }
        }
    }

    // --- Transitions ---

    /// login
    ///
    /// On success the returned user is published and persisted (the gateway
    /// has already persisted the token). On failure the error propagates
    /// untouched for the caller to display, and the session is unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self.api.login(email, password).await?;
        self.store.set_user(Some(&response.user)).await;
        self.set_user(Some(response.user.clone()));
        Ok(response)
    }

    /// register
    ///
    /// Same contract as `login`; `role` defaults to subscriber when `None`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<AuthResponse, ApiError> {
        let response = self.api.register(name, email, password, role).await?;
        self.store.set_user(Some(&response.user)).await;
        self.set_user(Some(response.user.clone()));
        Ok(response)
    }

    /// logout
    ///
    /// Never fails visibly: the server call is best-effort (the gateway
    /// swallows its error), and the token, persisted record, and current
    /// user are cleared unconditionally.
    pub async fn logout(&self) {
        self.api.logout().await;
        self.store.set_user(None).await;
        self.set_user(None);
    }

    /// update_user
    ///
    /// No-op when anonymous. Otherwise the fields the server echoes back
    /// are shallow-merged into the current user and re-persisted; fields
    /// absent from the response keep their local values. Errors are logged,
    /// not surfaced.
    pub async fn update_user(&self, patch: &UserPatch) {
        let Some(current) = self.snapshot().user else {
            return;
        };

        match self.api.update_user(current.id, patch).await {
            Ok(fields) => {
                let merged = merge_user(current, fields);
                self.store.set_user(Some(&merged)).await;
                self.set_user(Some(merged));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to update user");
            }
        }
    }

    // --- Derived state ---

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn is_organizer(&self) -> bool {
        self.state.borrow().is_organizer()
    }

    pub fn is_subscriber(&self) -> bool {
        self.state.borrow().is_subscriber()
    }

    // --- Internals ---

    fn publish(&self, user: Option<User>, loading: bool) {
        self.state.send_replace(SessionSnapshot { user, loading });
    }

    fn set_user(&self, user: Option<User>) {
        self.state.send_modify(|s| s.user = user);
    }
}

/// Shallow merge of a partial server response into the existing user.
/// The server wins field-by-field; anything it omitted is preserved.
fn merge_user(current: User, fields: UserPatch) -> User {
    User {
        id: fields.id.unwrap_or(current.id),
        name: fields.name.unwrap_or(current.name),
        email: fields.email.unwrap_or(current.email),
        role: fields.role.unwrap_or(current.role),
    }
}
