//! Submission service: validation, timestamps, persistence

use rsvp_core::{
    timestamp_now, Backend, Entry, EntryStore, GuestbookEntry, GuestbookSubmission, Result,
    RsvpSubmission,
};
use std::sync::Arc;
use tracing::info;

/// Most guestbook entries returned by one read
pub const GUESTBOOK_PAGE_SIZE: usize = 10;

pub struct SubmissionService {
    store: Arc<dyn EntryStore>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> Backend {
        self.store.backend()
    }

    /// Validate and store an RSVP. Nothing is written when validation fails.
    pub async fn submit_rsvp(&self, submission: RsvpSubmission) -> Result<()> {
        let entry = Entry::from(submission.into_entry(timestamp_now)?);
        self.save(entry).await
    }

    /// Validate and store a guestbook message. Nothing is written when validation fails.
    pub async fn submit_guestbook(&self, submission: GuestbookSubmission) -> Result<()> {
        let entry = Entry::from(submission.into_entry(timestamp_now)?);
        self.save(entry).await
    }

    /// Latest guestbook entries, newest first, never more than a page
    pub async fn recent_guestbook(&self, limit: Option<usize>) -> Result<Vec<GuestbookEntry>> {
        let limit = limit
            .unwrap_or(GUESTBOOK_PAGE_SIZE)
            .min(GUESTBOOK_PAGE_SIZE);
        self.store.list_guestbook(limit).await
    }

    async fn save(&self, entry: Entry) -> Result<()> {
        self.store.save(&entry).await?;
        info!(
            "Saved {} from {} ({} storage)",
            entry.kind(),
            entry.name(),
            self.store.backend()
        );
        Ok(())
    }
}
