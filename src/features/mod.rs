//! # Features
//!
//! - `reminders`: Notion query, page extraction, summary rules
//! - `notifications`: desktop notification delivery with retry

pub mod notifications;
pub mod reminders;
