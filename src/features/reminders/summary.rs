//! # Reminder Summary
//!
//! Decides notification text and urgency from the number of pending
//! reminders.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::features::reminders::extractor::Reminder;
use std::fmt;

/// Title shown on every notification
pub const NOTIFICATION_TITLE: &str = "Notion Reminders";

pub const IDLE_MESSAGE: &str = "All caught up! No pending reminders.";

/// Above this many reminders the summary is sent as critical
pub const CRITICAL_THRESHOLD: usize = 3;

/// Urgency levels understood by `notify-send -u`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Normal,
    Critical,
}

impl Urgency {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => Urgency::Low,
            n if n > CRITICAL_THRESHOLD => Urgency::Critical,
            _ => Urgency::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::Critical => "critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub message: String,
    pub urgency: Urgency,
    pub database_url: String,
}

/// What to tell the user about this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Digest {
    /// Nothing pending
    Idle,
    Pending(Summary),
}

pub fn database_url(database_id: &str) -> String {
    format!("https://www.notion.so/{database_id}")
}

pub fn summarize(reminders: &[Reminder], database_id: &str) -> Digest {
    let count = reminders.len();
    if count == 0 {
        return Digest::Idle;
    }

    let message = if count == 1 {
        "You have 1 pending reminder.\n\nClick to open in Notion.".to_string()
    } else {
        format!("You have {count} pending reminders.\n\nClick to open in Notion.")
    };

    Digest::Pending(Summary {
        count,
        message,
        urgency: Urgency::for_count(count),
        database_url: database_url(database_id),
    })
}
