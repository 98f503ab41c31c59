// Core layer - config, errors, retry policy
pub mod core;

// Features layer - reminders and desktop notifications
pub mod features;

// Application layer - one check per invocation
pub mod runner;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::core::{Config, ReminderError, RetryPolicy};
pub use crate::features::{
    // Notifications
    notifications::{Delivery, NotificationRequest, Notifier, NotifySend},
    // Reminders
    reminders::{NotionClient, PageSource, Reminder, Summary, Urgency},
};
pub use crate::runner::{run, Outcome, RunContext};
