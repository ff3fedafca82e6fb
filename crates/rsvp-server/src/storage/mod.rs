//! Storage layer
//!
//! Google Sheets when credentials are configured and reachable, local JSON
//! files otherwise. The choice is made once at startup.

pub mod google_auth;
pub mod local;
pub mod sheets;

pub use local::LocalStore;
pub use sheets::SheetsStore;

use crate::config::ServerConfig;
use rsvp_core::{EntryStore, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Pick the backend for the lifetime of the process.
///
/// A remote initialization failure is logged and permanently replaced by
/// the local store; only a local failure is returned.
pub async fn select_store(config: &ServerConfig) -> Result<Arc<dyn EntryStore>> {
    if let Some(sheets) = config.sheets() {
        info!("Initializing Google Sheets store...");
        match SheetsStore::connect(sheets).await {
            Ok(store) => {
                info!("Using Google Sheets storage");
                return Ok(Arc::new(store));
            }
            Err(e) => {
                error!(
                    "Google Sheets initialization failed, falling back to local files: {}",
                    e
                );
            }
        }
    } else {
        info!("Google Sheets not configured, using local files");
    }

    let store = LocalStore::open(&config.data_dir).await?;
    Ok(Arc::new(store))
}
