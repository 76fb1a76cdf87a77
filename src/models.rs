use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Identity & Roles ---

/// Role
///
/// The closed set of roles a signed-in user can hold. The derived ordering
/// IS the access hierarchy: `Subscriber < Organizer < Admin`, so a
/// capability check is a plain comparison rather than a string match.
///
/// An anonymous visitor is represented by the absence of a `User`, never by
/// a variant of this enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can browse and register for events.
    #[default]
    Subscriber,
    /// Can additionally create and manage their own events.
    Organizer,
    /// Full access, including the admin screens.
    Admin,
}

impl Role {
    /// Returns true when this role grants everything `required` grants:
    /// admin satisfies every requirement, organizer satisfies organizer and
    /// subscriber, subscriber satisfies only subscriber.
    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Subscriber => "subscriber",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User
///
/// The authenticated user record as returned by the backend. This is also
/// the shape persisted under the `eventpro_user` storage key between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// UserPatch
///
/// Partial user record, used both as the `PUT /users/:id` request body and
/// as its response: the server may echo back only the fields it changed,
/// and the session layer merges whatever is present into the local user.
/// Absent fields are omitted from the JSON entirely.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

// --- Events ---

/// EventStatus
///
/// Whether an event is still open for registration or already over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Past,
}

/// Event
///
/// A full event record as served by the backend. Field names are camelCase
/// on the wire (`organizerId`, `maxParticipants`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub category: String,
    /// Display name of the organizing user.
    pub organizer: String,
    pub organizer_id: i64,
    pub max_participants: u32,
    pub current_participants: u32,
    pub image: String,
    pub status: EventStatus,
    pub price: f64,
    pub tags: Vec<String>,
}

/// EventDraft
///
/// Payload for creating a new event (POST /events): a full event record
/// minus the server-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub category: String,
    pub organizer: String,
    pub organizer_id: i64,
    pub max_participants: u32,
    pub current_participants: u32,
    pub image: String,
    pub status: EventStatus,
    pub price: f64,
    pub tags: Vec<String>,
}

/// EventPatch
///
/// Partial update payload for PUT /events/:id. Only the provided fields are
/// serialized, so an omitted field is left untouched server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Participant
///
/// One attendee row from GET /events/:id/participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

// --- Auth payloads ---

/// LoginRequest
///
/// Body for POST /login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// RegisterRequest
///
/// Body for POST /register. The password is passed straight through to the
/// backend and never persisted or logged by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// AuthResponse
///
/// Success shape of POST /login and POST /register. The token is optional
/// on the wire; the gateway only persists one the server actually sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user: User,
}
