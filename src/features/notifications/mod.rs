//! # Notifications Feature
//!
//! Desktop notifications via the libnotify `notify-send` helper.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod notifier;

pub use notifier::{
    resolve_icon, Delivery, NotificationRequest, Notifier, NotifyBackend, NotifySend,
};
