//! # Reminders Feature
//!
//! Queries the Notion database for unchecked items, normalizes each page,
//! and condenses the result into a notification summary.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod client;
pub mod extractor;
pub mod summary;

pub use client::{NotionClient, PageSource, QueryResponse, RawPage};
pub use extractor::{extract, extract_all, Reminder};
pub use summary::{summarize, Digest, Summary, Urgency, NOTIFICATION_TITLE};
