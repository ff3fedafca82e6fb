//! Entry types

use serde::{Deserialize, Serialize};

const RSVP_HEADERS: &[&str] = &["Timestamp", "Name", "Phone", "Guests", "Note", "Side"];
const GUESTBOOK_HEADERS: &[&str] = &["Timestamp", "Name", "Contact", "Message", "Side"];

/// The two record kinds collected by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Rsvp,
    Guestbook,
}

impl EntryKind {
    pub const ALL: [EntryKind; 2] = [EntryKind::Rsvp, EntryKind::Guestbook];

    /// Title of the sheet holding this kind on the remote backend
    pub fn sheet_title(&self) -> &'static str {
        match self {
            EntryKind::Rsvp => "RSVP",
            EntryKind::Guestbook => "Guestbook",
        }
    }

    /// File name of the JSON array holding this kind on the local backend
    pub fn file_name(&self) -> &'static str {
        match self {
            EntryKind::Rsvp => "rsvp.json",
            EntryKind::Guestbook => "guestbook.json",
        }
    }

    /// Fixed header row, in column order
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            EntryKind::Rsvp => RSVP_HEADERS,
            EntryKind::Guestbook => GUESTBOOK_HEADERS,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Rsvp => write!(f, "rsvp"),
            EntryKind::Guestbook => write!(f, "guestbook"),
        }
    }
}

/// A stored RSVP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpEntry {
    pub timestamp: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "one")]
    pub guests: u32,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

/// A stored guestbook message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    pub timestamp: String,
    pub name: String,
    #[serde(default)]
    pub contact: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

fn one() -> u32 {
    1
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

fn side_cell(row: &[String], index: usize) -> Option<String> {
    row.get(index)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl RsvpEntry {
    /// Cells in header order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.name.clone(),
            self.phone.clone(),
            self.guests.to_string(),
            self.note.clone(),
            self.side.clone().unwrap_or_default(),
        ]
    }

    /// Rebuild an entry from sheet cells. Short rows are padded.
    pub fn from_row(row: &[String]) -> Self {
        Self {
            timestamp: cell(row, 0),
            name: cell(row, 1),
            phone: cell(row, 2),
            guests: crate::parse_guest_count(&cell(row, 3)),
            note: cell(row, 4),
            side: side_cell(row, 5),
        }
    }
}

impl GuestbookEntry {
    /// Cells in header order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.name.clone(),
            self.contact.clone(),
            self.message.clone(),
            self.side.clone().unwrap_or_default(),
        ]
    }

    /// Rebuild an entry from sheet cells. Short rows are padded.
    pub fn from_row(row: &[String]) -> Self {
        Self {
            timestamp: cell(row, 0),
            name: cell(row, 1),
            contact: cell(row, 2),
            message: cell(row, 3),
            side: side_cell(row, 4),
        }
    }
}

/// Any entry accepted by a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Rsvp(RsvpEntry),
    Guestbook(GuestbookEntry),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Rsvp(_) => EntryKind::Rsvp,
            Entry::Guestbook(_) => EntryKind::Guestbook,
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        match self {
            Entry::Rsvp(e) => e.to_row(),
            Entry::Guestbook(e) => e.to_row(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::Rsvp(e) => &e.name,
            Entry::Guestbook(e) => &e.name,
        }
    }
}

impl From<RsvpEntry> for Entry {
    fn from(entry: RsvpEntry) -> Self {
        Entry::Rsvp(entry)
    }
}

impl From<GuestbookEntry> for Entry {
    fn from(entry: GuestbookEntry) -> Self {
        Entry::Guestbook(entry)
    }
}
