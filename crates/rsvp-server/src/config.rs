//! Server configuration loaded from the environment

use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 15;

/// Google Sheets service-account settings
#[derive(Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub client_email: String,
    pub private_key: String,
    pub api_base: String,
    pub token_uri: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("token_uri", &self.token_uri)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
    sheets: Option<SheetsConfig>,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_address = var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let data_dir = var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let static_dir = var("STATIC_DIR").map(PathBuf::from);

        let credentials = (
            var("GOOGLE_SHEET_ID"),
            var("GOOGLE_SERVICE_ACCOUNT_EMAIL"),
            var("GOOGLE_PRIVATE_KEY"),
        );

        let sheets = match credentials {
            (Some(spreadsheet_id), Some(client_email), Some(private_key)) => {
                let timeout = match var("REMOTE_TIMEOUT_SECS") {
                    Some(raw) => raw.parse().unwrap_or_else(|e| {
                        warn!(
                            "Invalid REMOTE_TIMEOUT_SECS {:?} ({}), using {}",
                            raw, e, DEFAULT_REMOTE_TIMEOUT_SECS
                        );
                        DEFAULT_REMOTE_TIMEOUT_SECS
                    }),
                    None => DEFAULT_REMOTE_TIMEOUT_SECS,
                };

                Some(SheetsConfig {
                    spreadsheet_id,
                    client_email,
                    private_key: normalize_private_key(&private_key),
                    api_base: var("GOOGLE_SHEETS_API_BASE")
                        .unwrap_or_else(|| DEFAULT_SHEETS_API_BASE.to_string())
                        .trim_end_matches('/')
                        .to_string(),
                    token_uri: var("GOOGLE_TOKEN_URI")
                        .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
                    timeout: Duration::from_secs(timeout),
                })
            }
            (None, None, None) => None,
            _ => {
                warn!("Google Sheets credentials are incomplete, ignoring them");
                None
            }
        };

        Self {
            bind_address,
            data_dir,
            static_dir,
            sheets,
        }
    }

    /// Local-only configuration rooted at `data_dir`
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            data_dir: data_dir.into(),
            static_dir: None,
            sheets: None,
        }
    }

    pub fn with_sheets(mut self, sheets: SheetsConfig) -> Self {
        self.sheets = Some(sheets);
        self
    }

    /// Remote settings, present only when every credential is non-empty
    pub fn sheets(&self) -> Option<&SheetsConfig> {
        self.sheets.as_ref()
    }

    pub fn log_summary(&self) {
        info!(
            "Config loaded: bind={}, data_dir={}, static_dir={}, sheets={}",
            self.bind_address,
            self.data_dir.display(),
            self.static_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.sheets
                .as_ref()
                .map(|s| s.spreadsheet_id.as_str())
                .unwrap_or("-"),
        );
    }
}

/// Keys pasted into env files usually carry escaped newlines
fn normalize_private_key(raw: &str) -> String {
    raw.trim_matches('"').replace("\\n", "\n")
}
