//! Error types for the RSVP backend

use rsvp_types::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RsvpError>;

#[derive(Error, Debug)]
pub enum RsvpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl RsvpError {
    /// True for errors caused by the request rather than the storage layer
    pub fn is_validation(&self) -> bool {
        matches!(self, RsvpError::Validation(_))
    }
}

impl From<serde_json::Error> for RsvpError {
    fn from(e: serde_json::Error) -> Self {
        RsvpError::Serialization(e.to_string())
    }
}
