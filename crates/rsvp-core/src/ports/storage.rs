//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use rsvp_types::{Entry, GuestbookEntry};
use serde::Serialize;

/// Which persistence target is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Remote,
    Local,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Remote => write!(f, "remote"),
            Backend::Local => write!(f, "local"),
        }
    }
}

/// Append-only entry store.
///
/// Implementations keep every kind ordered by recency; `list_guestbook`
/// returns the most recent entry first regardless of how rows are laid out
/// underneath.
#[async_trait]
pub trait EntryStore: Send + Sync {
    fn backend(&self) -> Backend;

    /// Append one entry to the store for its kind
    async fn save(&self, entry: &Entry) -> Result<()>;

    /// Up to `limit` guestbook entries, most recent first
    async fn list_guestbook(&self, limit: usize) -> Result<Vec<GuestbookEntry>>;
}
