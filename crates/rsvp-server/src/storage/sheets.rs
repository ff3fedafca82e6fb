//! Google Sheets store
//!
//! One sheet per entry kind with a fixed header row in row 1. Rows are
//! appended chronologically, so readers reverse them to get newest first.

use super::google_auth::ServiceAccountAuth;
use crate::config::SheetsConfig;
use async_trait::async_trait;
use rsvp_core::{Backend, Entry, EntryKind, EntryStore, GuestbookEntry, Result, RsvpError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

pub struct SheetsStore {
    http: reqwest::Client,
    auth: ServiceAccountAuth,
    spreadsheet_url: String,
    // Kinds whose sheet and header row are known to exist
    ready: Mutex<HashSet<EntryKind>>,
}

impl SheetsStore {
    pub fn new(config: &SheetsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RsvpError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let auth = ServiceAccountAuth::new(
            http.clone(),
            &config.client_email,
            &config.private_key,
            &config.token_uri,
        )?;

        Ok(Self {
            http,
            auth,
            spreadsheet_url: format!(
                "{}/v4/spreadsheets/{}",
                config.api_base, config.spreadsheet_id
            ),
            ready: Mutex::new(HashSet::new()),
        })
    }

    /// Build the store and verify every sheet and header row
    pub async fn connect(config: &SheetsConfig) -> Result<Self> {
        let store = Self::new(config)?;
        store.initialize().await?;
        Ok(store)
    }

    pub async fn initialize(&self) -> Result<()> {
        for kind in EntryKind::ALL {
            self.ensure_ready(kind).await?;
        }
        info!("Google Sheets store ready: {}", self.spreadsheet_url);
        Ok(())
    }

    async fn ensure_ready(&self, kind: EntryKind) -> Result<()> {
        let mut ready = self.ready.lock().await;
        if ready.contains(&kind) {
            return Ok(());
        }

        let title = kind.sheet_title();
        let titles = self.sheet_titles().await?;
        if !titles.iter().any(|t| t == title) {
            info!("Adding sheet {}", title);
            self.add_sheet(title).await?;
        }

        let header_range = format!("{}!A1:{}1", title, column_letter(kind.headers().len()));
        let header = self.get_values(&header_range).await?;
        if header.iter().all(|row| is_blank(row)) {
            info!("Writing header row for {}", title);
            let headers: Vec<&str> = kind.headers().to_vec();
            self.put_values(&header_range, json!([headers])).await?;
        }

        ready.insert(kind);
        Ok(())
    }

    async fn sheet_titles(&self) -> Result<Vec<String>> {
        let request = self
            .http
            .get(&self.spreadsheet_url)
            .query(&[("fields", "sheets.properties.title")]);
        let meta: SpreadsheetMeta = self.send_json(request, "read spreadsheet").await?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    async fn add_sheet(&self, title: &str) -> Result<()> {
        let request = self
            .http
            .post(format!("{}:batchUpdate", self.spreadsheet_url))
            .json(&json!({
                "requests": [{ "addSheet": { "properties": { "title": title } } }]
            }));
        self.send(request, "add sheet").await?;
        Ok(())
    }

    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let request = self
            .http
            .get(format!("{}/values/{}", self.spreadsheet_url, range));
        let values: ValueRange = self.send_json(request, "read values").await?;
        Ok(values
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn put_values(&self, range: &str, values: Value) -> Result<()> {
        let request = self
            .http
            .put(format!("{}/values/{}", self.spreadsheet_url, range))
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "majorDimension": "ROWS", "values": values }));
        self.send(request, "write values").await?;
        Ok(())
    }

    async fn append_row(&self, title: &str, row: Vec<String>) -> Result<()> {
        let request = self
            .http
            .post(format!("{}/values/{}!A1:append", self.spreadsheet_url, title))
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "majorDimension": "ROWS", "values": [row] }));
        self.send(request, "append row").await?;
        Ok(())
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        action: &str,
    ) -> Result<reqwest::Response> {
        let token = self.auth.access_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RsvpError::Remote(format!("Failed to {}: {}", action, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RsvpError::Remote(format!(
                "Failed to {}: {} {}",
                action, status, body
            )));
        }
        Ok(response)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        action: &str,
    ) -> Result<T> {
        let response = self.send(request, action).await?;
        let body = response
            .text()
            .await
            .map_err(|e| RsvpError::Remote(format!("Failed to {}: {}", action, e)))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl EntryStore for SheetsStore {
    fn backend(&self) -> Backend {
        Backend::Remote
    }

    async fn save(&self, entry: &Entry) -> Result<()> {
        let kind = entry.kind();
        self.ensure_ready(kind).await?;
        self.append_row(kind.sheet_title(), entry.to_row()).await?;
        debug!("Appended {} row", kind);
        Ok(())
    }

    async fn list_guestbook(&self, limit: usize) -> Result<Vec<GuestbookEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let kind = EntryKind::Guestbook;
        self.ensure_ready(kind).await?;

        let range = format!(
            "{}!A2:{}",
            kind.sheet_title(),
            column_letter(kind.headers().len())
        );
        let rows = self.get_values(&range).await?;

        Ok(rows
            .iter()
            .filter(|row| !is_blank(row))
            .rev()
            .take(limit)
            .map(|row| GuestbookEntry::from_row(row))
            .collect())
    }
}

/// Spreadsheet column name for a 1-based index (1 => A, 27 => AA)
fn column_letter(mut index: usize) -> String {
    let mut name = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        name.push(b'A' + rem as u8);
        index = (index - 1) / 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
