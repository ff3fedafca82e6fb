//! RSVP Core Library
//!
//! Error type, timestamps, and the storage port shared by every backend.

// Re-export pure types from rsvp-types
pub use rsvp_types::*;

pub mod error;
pub mod ports;

pub use error::{RsvpError, Result};
pub use ports::{Backend, EntryStore};

use chrono::{SecondsFormat, Utc};

/// Current UTC time as stamped on submissions without a client timestamp
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let stamp = timestamp_now();
        assert!(stamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
        // 2026-10-18T12:00:00.000Z
        assert_eq!(stamp.len(), 24);
    }
}
