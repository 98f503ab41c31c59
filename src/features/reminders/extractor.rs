//! # Reminder Extraction
//!
//! Normalizes a raw Notion page into a display-ready [`Reminder`]. Every
//! property lookup is a chain of kind-checked `Option` steps over the JSON
//! tree; a missing or oddly-shaped property just leaves the field at its
//! default. Extraction never fails and never drops a page.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::features::reminders::client::RawPage;
use chrono::DateTime;
use serde_json::{Map, Value};

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Display format for creation timestamps, e.g. `Jan 02, 2006 at 15:04`
pub const CREATED_FORMAT: &str = "%b %d, %Y at %H:%M";

const NAME_PROPERTY: &str = "Name";
const CREATED_PROPERTY: &str = "Created At";
const PRIORITY_PROPERTY: &str = "Priority";
const CATEGORY_PROPERTY: &str = "Category";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Never empty
    pub title: String,
    /// Formatted creation time, `Unknown date`, or empty when absent
    pub created: String,
    /// `" [Priority: X]"` or empty
    pub priority: String,
    /// `" [Category: X]"` or empty
    pub category: String,
    pub url: String,
}

impl Reminder {
    /// One console line for this reminder, numbered from 1
    pub fn log_line(&self, index: usize) -> String {
        format!(
            "{}. {}{}{} (from {})",
            index, self.title, self.priority, self.category, self.created
        )
    }
}

pub fn extract(page: &RawPage) -> Reminder {
    let props = &page.properties;

    let title = title_text(props)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED)
        .to_string();

    let created = match created_time(props) {
        Some(raw) => format_created(raw).unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        None => String::new(),
    };

    let priority = select_name(props, PRIORITY_PROPERTY)
        .map(|name| format!(" [Priority: {name}]"))
        .unwrap_or_default();

    let category = select_name(props, CATEGORY_PROPERTY)
        .map(|name| format!(" [Category: {name}]"))
        .unwrap_or_default();

    Reminder {
        title,
        created,
        priority,
        category,
        url: page.url.clone(),
    }
}

/// Extract every page, preserving query order
pub fn extract_all(pages: &[RawPage]) -> Vec<Reminder> {
    pages.iter().map(extract).collect()
}

/// `Name.title[0].plain_text`
fn title_text(props: &Map<String, Value>) -> Option<&str> {
    props
        .get(NAME_PROPERTY)?
        .get("title")?
        .as_array()?
        .first()?
        .get("plain_text")?
        .as_str()
}

/// `Created At.created_time`
fn created_time(props: &Map<String, Value>) -> Option<&str> {
    props.get(CREATED_PROPERTY)?.get("created_time")?.as_str()
}

/// `<property>.select.name`
fn select_name<'a>(props: &'a Map<String, Value>, property: &str) -> Option<&'a str> {
    props.get(property)?.get("select")?.get("name")?.as_str()
}

/// Format an RFC 3339 timestamp in its own offset
fn format_created(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.format(CREATED_FORMAT).to_string())
}
