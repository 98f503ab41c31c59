//! # Error Types
//!
//! Error kinds raised by the reminder pipeline. Fatality is decided by the
//! stage that observed the error, not by the variant alone.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReminderError>;

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("config file not found at {}: {reason}. Please run setup script first", .path.display())]
    ConfigMissing { path: PathBuf, reason: String },

    #[error("could not determine home directory; config file location is unknown")]
    HomeMissing,

    #[error("{} must be set in config file", .0.join(" and "))]
    ConfigIncomplete(Vec<&'static str>),

    #[error("failed to send request: {0}")]
    Transport(String),

    #[error("notion API error (status {status}): {body}")]
    Remote { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("failed to show notification: {0}")]
    Notifier(String),
}

impl ReminderError {
    /// Whether this error aborts the process once its retry budget (if any) is spent
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ReminderError::Notifier(_))
    }

    /// Process exit status for a run that ended with this error
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() {
            1
        } else {
            0
        }
    }
}

impl From<reqwest::Error> for ReminderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ReminderError::Decode(e.to_string())
        } else {
            ReminderError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ReminderError {
    fn from(e: serde_json::Error) -> Self {
        ReminderError::Decode(e.to_string())
    }
}
