//! Submission request bodies

use crate::{coerce_guest_count, GuestbookEntry, RsvpEntry};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A required field was missing or blank
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} is required")]
pub struct ValidationError {
    pub field: &'static str,
}

impl ValidationError {
    pub fn required(field: &'static str) -> Self {
        Self { field }
    }
}

/// RSVP request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RsvpSubmission {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default)]
    pub guests: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub side: Option<String>,
}

/// Guestbook request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestbookSubmission {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub side: Option<String>,
}

impl RsvpSubmission {
    /// Validate and build the stored entry.
    ///
    /// `stamp` supplies the server timestamp when the client sent none.
    pub fn into_entry(
        self,
        stamp: impl FnOnce() -> String,
    ) -> Result<RsvpEntry, ValidationError> {
        let name = required(self.name, "name")?;

        Ok(RsvpEntry {
            timestamp: optional(self.timestamp).unwrap_or_else(stamp),
            name,
            phone: optional(self.phone).unwrap_or_default(),
            guests: coerce_guest_count(self.guests.as_ref()),
            note: optional(self.note).unwrap_or_default(),
            side: optional(self.side),
        })
    }
}

impl GuestbookSubmission {
    /// Validate and build the stored entry.
    ///
    /// `stamp` supplies the server timestamp when the client sent none.
    pub fn into_entry(
        self,
        stamp: impl FnOnce() -> String,
    ) -> Result<GuestbookEntry, ValidationError> {
        let name = required(self.name, "name")?;
        let message = required(self.message, "message")?;

        Ok(GuestbookEntry {
            timestamp: optional(self.timestamp).unwrap_or_else(stamp),
            name,
            contact: optional(self.contact).unwrap_or_default(),
            message,
            side: optional(self.side),
        })
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    optional(value).ok_or(ValidationError::required(field))
}

/// Accept strings, numbers and booleans for free-text fields.
/// Arrays and objects count as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        None | Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    })
}
