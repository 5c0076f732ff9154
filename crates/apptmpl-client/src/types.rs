//! Request and response types for the admin and private APIs.
//!
//! Wire shapes (`Api*`) mirror the server's JSON; the public types are what
//! callers and the session store work with.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Response payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204, or no content type.
    Empty,
    /// `application/json`.
    Json(Value),
    /// `text/plain`.
    Text(String),
}

impl Payload {
    /// Deserialize the payload into a typed value.
    ///
    /// `Empty` is treated as JSON `null` and `Text` as a JSON string.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into())?)
    }

    /// Whether the response had no body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Empty => Value::Null,
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Structured error body sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErr {
    /// Error message.
    pub msg: String,
    /// Machine-readable code; may be empty.
    pub code: String,
    /// Optional structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Request correlation id.
    pub request_id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// The authenticated identity held by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Account type (role).
    #[serde(rename = "type")]
    pub kind: String,
    /// Account status.
    pub status: String,
}

/// User as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: String,
}

impl From<ApiUser> for User {
    fn from(user: ApiUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            kind: user.kind,
            status: user.status,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Registration<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// System
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of the server's version probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VersionInfo {
    /// Deployment environment name.
    pub env: String,
    /// Last commit the server was built from.
    pub last_commit: String,
    /// Build time, when the server was stamped with one.
    pub build_time: Option<DateTime<Utc>>,
    /// Server time when the probe was answered.
    pub time: DateTime<Utc>,
}

/// Version probe as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiVersion {
    pub env: String,
    pub last_commit: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub build_time: Option<DateTime<Utc>>,
    pub time: DateTime<Utc>,
}

impl From<ApiVersion> for VersionInfo {
    fn from(version: ApiVersion) -> Self {
        Self {
            env: version.env,
            last_commit: version.last_commit,
            build_time: version.build_time,
            time: version.time,
        }
    }
}

/// Unstamped builds report `n/a` instead of a timestamp.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|t| t.with_timezone(&Utc)))
}
