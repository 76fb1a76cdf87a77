use reqwest::{
    Method,
    header::{self, HeaderMap},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::RwLock;

use crate::{
    config::ClientConfig,
    error::ApiError,
    models::{
        AuthResponse, Event, EventDraft, EventPatch, EventStatus, LoginRequest, Participant,
        RegisterRequest, Role, User, UserPatch,
    },
    store::StoreState,
};

/// ApiClient
///
/// The single choke point for all communication with the EventPro backend.
/// It owns the bearer token: the persisted value is read once at
/// construction and cached in memory, every authenticated request replays
/// it, and login/register/logout are the only operations that change it.
///
/// No operation here mutates session state; the session layer decides what
/// to do with responses and errors.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    /// In-memory token cache. Cross-process changes to the persisted value
    /// are not observed after construction.
    token: RwLock<Option<String>>,
    store: StoreState,
}

impl ApiClient {
    /// new
    ///
    /// Builds the gateway against the configured base URL and primes the
    /// token cache from the persisted store.
    pub async fn new(config: &ClientConfig, store: StoreState) -> Self {
        let token = store.token().await;
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            token: RwLock::new(token),
            store,
        }
    }

    /// The currently cached bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    /// set_token
    ///
    /// Updates the in-memory cache and the persisted value in one step.
    /// `None` removes the stored token.
    pub async fn set_token(&self, token: Option<&str>) {
        *self.token.write().unwrap() = token.map(str::to_string);
        self.store.set_token(token).await;
    }

    // --- Request plumbing ---

    /// send
    ///
    /// Issues one HTTP call: merges the default headers (JSON content
    /// negotiation plus `Authorization: Bearer <token>` iff a token is
    /// cached) with any caller-supplied headers, then normalizes any
    /// failure into `ApiError`. A non-success status becomes
    /// `ApiError::Http` with the message taken from the response body's
    /// `message` field when parseable, else a generic status-coded
    /// fallback. A request that never produced a response becomes
    /// `ApiError::Transport`.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, endpoint, "API request");

        let mut request = self
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        // Clone out of the lock; the guard must not be held across await.
        let token = self.token.read().unwrap().clone();
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        if let Some(extra) = extra_headers {
            // Caller-supplied headers win over the defaults, name by name.
            request = request.headers(extra);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

            tracing::warn!(endpoint, status = status.as_u16(), "API request failed");
            return Err(ApiError::Http { status, message });
        }

        Ok(response)
    }

    /// request
    ///
    /// The generic choke point every domain operation goes through: sends
    /// one call with the merged headers and deserializes the success body
    /// into `T`. Public so callers with endpoints outside the documented
    /// set can still route through the gateway's header and error
    /// handling.
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, endpoint, body, extra_headers).await?;
        response.json::<T>().await.map_err(ApiError::from)
    }

    /// Sends and discards the success body, for endpoints whose response
    /// shape is unspecified (logout, deletes, subscription toggles).
    async fn request_discarded<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let response = self.send(method, endpoint, body, None).await?;
        let _ = response.bytes().await;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, None::<&()>, None).await
    }

    // --- Authentication ---

    /// login
    ///
    /// POST /login. On success the returned token (when present) is cached
    /// and persisted before the response is handed back.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self
            .request(Method::POST, "/login", Some(&body), None)
            .await?;

        if let Some(token) = &response.token {
            self.set_token(Some(token)).await;
        }

        Ok(response)
    }

    /// register
    ///
    /// POST /register. `role` defaults to subscriber when the caller leaves
    /// it unspecified. Token handling matches `login`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<AuthResponse, ApiError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.unwrap_or_default(),
        };
        let response: AuthResponse = self
            .request(Method::POST, "/register", Some(&body), None)
            .await?;

        if let Some(token) = &response.token {
            self.set_token(Some(token)).await;
        }

        Ok(response)
    }

    /// logout
    ///
    /// POST /logout on a best-effort basis: a server or transport failure is
    /// logged and ignored so the local token is cleared regardless. This is
    /// the one place the gateway swallows an error.
    pub async fn logout(&self) {
        if let Err(e) = self
            .request_discarded(Method::POST, "/logout", None::<&()>)
            .await
        {
            tracing::warn!(error = %e, "server logout failed; clearing local token anyway");
        }
        self.set_token(None).await;
    }

    /// GET /user — the authoritative record for the current token. Used by
    /// the session layer's startup verification.
    pub async fn get_current_user(&self) -> Result<User, ApiError> {
        self.get_json("/user").await
    }

    // --- Events ---

    pub async fn get_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_json("/events").await
    }

    pub async fn get_event(&self, id: i64) -> Result<Event, ApiError> {
        self.get_json(&format!("/events/{id}")).await
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        self.request(Method::POST, "/events", Some(draft), None)
            .await
    }

    pub async fn update_event(&self, id: i64, patch: &EventPatch) -> Result<Event, ApiError> {
        self.request(Method::PUT, &format!("/events/{id}"), Some(patch), None)
            .await
    }

    pub async fn delete_event(&self, id: i64) -> Result<(), ApiError> {
        self.request_discarded(Method::DELETE, &format!("/events/{id}"), None::<&()>)
            .await
    }

    // --- Event registrations ---

    pub async fn subscribe_to_event(&self, event_id: i64) -> Result<(), ApiError> {
        self.request_discarded(
            Method::POST,
            &format!("/events/{event_id}/subscribe"),
            None::<&()>,
        )
        .await
    }

    pub async fn unsubscribe_from_event(&self, event_id: i64) -> Result<(), ApiError> {
        self.request_discarded(
            Method::DELETE,
            &format!("/events/{event_id}/unsubscribe"),
            None::<&()>,
        )
        .await
    }

    pub async fn get_event_participants(
        &self,
        event_id: i64,
    ) -> Result<Vec<Participant>, ApiError> {
        self.get_json(&format!("/events/{event_id}/participants"))
            .await
    }

    // --- User management ---

    /// Events organized by the given user.
    pub async fn get_user_events(&self, user_id: i64) -> Result<Vec<Event>, ApiError> {
        self.get_json(&format!("/users/{user_id}/events")).await
    }

    /// Events the given user is registered for.
    pub async fn get_user_registrations(&self, user_id: i64) -> Result<Vec<Event>, ApiError> {
        self.get_json(&format!("/users/{user_id}/registrations"))
            .await
    }

    /// PUT /users/:id. The response is itself a partial record: the server
    /// may echo only the fields it changed.
    pub async fn update_user(&self, user_id: i64, patch: &UserPatch) -> Result<UserPatch, ApiError> {
        self.request(Method::PUT, &format!("/users/{user_id}"), Some(patch), None)
            .await
    }

    // --- Derived queries ---

    pub async fn get_upcoming_events(&self) -> Result<Vec<Event>, ApiError> {
        let events = self.get_events().await?;
        Ok(events
            .into_iter()
            .filter(|e| e.status == EventStatus::Upcoming)
            .collect())
    }

    pub async fn get_past_events(&self) -> Result<Vec<Event>, ApiError> {
        let events = self.get_events().await?;
        Ok(events
            .into_iter()
            .filter(|e| e.status == EventStatus::Past)
            .collect())
    }

    /// Whether `user_id` is registered for `event_id`. Lookup failures
    /// degrade to `false` rather than surfacing an error.
    pub async fn is_user_registered(&self, user_id: i64, event_id: i64) -> bool {
        match self.get_user_registrations(user_id).await {
            Ok(registrations) => registrations.iter().any(|e| e.id == event_id),
            Err(e) => {
                tracing::warn!(user_id, event_id, error = %e, "registration check failed");
                false
            }
        }
    }
}
