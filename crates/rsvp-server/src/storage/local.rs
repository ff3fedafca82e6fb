//! Local JSON-file store
//!
//! One pretty-printed JSON array per entry kind, most recent entry first.

use async_trait::async_trait;
use rsvp_core::{Backend, Entry, EntryKind, EntryStore, GuestbookEntry, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

pub struct LocalStore {
    data_dir: PathBuf,
    // Serializes each file's read-modify-write
    rsvp_lock: Mutex<()>,
    guestbook_lock: Mutex<()>,
}

impl LocalStore {
    /// Open the store, creating the directory and empty files if absent
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&data_dir).await?;

        let store = Self {
            data_dir,
            rsvp_lock: Mutex::new(()),
            guestbook_lock: Mutex::new(()),
        };

        for kind in EntryKind::ALL {
            let path = store.path(kind);
            if !tokio::fs::try_exists(&path).await? {
                info!("Creating {}", path.display());
                tokio::fs::write(&path, b"[]").await?;
            }
        }

        info!("Local store ready at {}", store.data_dir.display());
        Ok(store)
    }

    pub fn path(&self, kind: EntryKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    fn lock(&self, kind: EntryKind) -> &Mutex<()> {
        match kind {
            EntryKind::Rsvp => &self.rsvp_lock,
            EntryKind::Guestbook => &self.guestbook_lock,
        }
    }

    async fn read_list<T: DeserializeOwned>(&self, kind: EntryKind) -> Result<Vec<T>> {
        let path = self.path(kind);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_list<T: Serialize>(&self, kind: EntryKind, items: &[T]) -> Result<()> {
        let path = self.path(kind);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn prepend<T>(&self, kind: EntryKind, entry: &T) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let _guard = self.lock(kind).lock().await;
        let mut items: Vec<T> = self.read_list(kind).await?;
        items.insert(0, entry.clone());
        self.write_list(kind, &items).await?;
        debug!("{} now holds {} entries", kind.file_name(), items.len());
        Ok(())
    }
}

#[async_trait]
impl EntryStore for LocalStore {
    fn backend(&self) -> Backend {
        Backend::Local
    }

    async fn save(&self, entry: &Entry) -> Result<()> {
        match entry {
            Entry::Rsvp(e) => self.prepend(EntryKind::Rsvp, e).await,
            Entry::Guestbook(e) => self.prepend(EntryKind::Guestbook, e).await,
        }
    }

    async fn list_guestbook(&self, limit: usize) -> Result<Vec<GuestbookEntry>> {
        let mut items: Vec<GuestbookEntry> = self.read_list(EntryKind::Guestbook).await?;
        items.truncate(limit);
        Ok(items)
    }
}
