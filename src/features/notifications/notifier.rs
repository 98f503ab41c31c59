//! # Feature: Desktop Notification
//!
//! Shows the reminder summary through `notify-send`. Each attempt spawns
//! the helper and waits for it; a non-zero exit counts as failure and is
//! retried on the notifier backoff schedule. Running out of attempts is
//! logged and otherwise ignored.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use crate::core::{ReminderError, Result, RetryPolicy};
use crate::features::reminders::summary::{Summary, Urgency, IDLE_MESSAGE, NOTIFICATION_TITLE};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

pub const NOTIFY_COMMAND: &str = "notify-send";

/// Themed icon used when no custom logo is installed
pub const FALLBACK_ICON: &str = "dialog-information";

pub const APP_NAME: &str = "Notion Reminders";
pub const IDLE_APP_NAME: &str = "Notion Reminders - Complete";

/// Default action advertised on the summary notification
pub const OPEN_ACTION: &str = "default=Open in Notion";

pub const INSTALL_HINT: &str = "Make sure libnotify is installed (e.g. sudo pacman -S libnotify)";

/// Where the setup script installs the optional logo
pub fn icon_path(home: &Path) -> PathBuf {
    home.join(".local")
        .join("share")
        .join("notion-reminder")
        .join("logo.svg")
}

/// Custom logo if installed, otherwise the themed fallback
pub fn resolve_icon(home: &Path) -> String {
    let path = icon_path(home);
    if path.is_file() {
        path.to_string_lossy().into_owned()
    } else {
        FALLBACK_ICON.to_string()
    }
}

/// A single notification, independent of how it is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub urgency: Urgency,
    pub icon: String,
    pub app_name: &'static str,
    /// Ask the daemon not to auto-dismiss (`-t 0`)
    pub persistent: bool,
    pub action: Option<&'static str>,
    pub title: String,
    pub message: String,
}

impl NotificationRequest {
    pub fn summary(summary: &Summary, icon: impl Into<String>) -> Self {
        Self {
            urgency: summary.urgency,
            icon: icon.into(),
            app_name: APP_NAME,
            persistent: true,
            action: (!summary.database_url.is_empty()).then_some(OPEN_ACTION),
            title: NOTIFICATION_TITLE.to_string(),
            message: summary.message.clone(),
        }
    }

    pub fn idle(icon: impl Into<String>) -> Self {
        Self {
            urgency: Urgency::Low,
            icon: icon.into(),
            app_name: IDLE_APP_NAME,
            persistent: false,
            action: None,
            title: NOTIFICATION_TITLE.to_string(),
            message: IDLE_MESSAGE.to_string(),
        }
    }

    /// Argument vector for `notify-send`
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-u".to_string(),
            self.urgency.to_string(),
            "-i".to_string(),
            self.icon.clone(),
            "-a".to_string(),
            self.app_name.to_string(),
        ];

        if self.persistent {
            args.push("-t".to_string());
            args.push("0".to_string());
        }

        if let Some(action) = self.action {
            args.push("-A".to_string());
            args.push(action.to_string());
        }

        args.push(self.title.clone());
        args.push(self.message.clone());
        args
    }
}

/// Something that can put a notification on screen
#[async_trait]
pub trait NotifyBackend: Send + Sync {
    /// Run one delivery attempt with a prepared argument vector
    async fn send(&self, args: &[String]) -> Result<()>;
}

/// Spawns the `notify-send` executable found on `PATH`
pub struct NotifySend {
    program: String,
}

impl Default for NotifySend {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifySend {
    pub fn new() -> Self {
        Self::with_program(NOTIFY_COMMAND)
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl NotifyBackend for NotifySend {
    async fn send(&self, args: &[String]) -> Result<()> {
        debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ReminderError::Notifier(format!("failed to run {}: {e}", self.program)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        Err(ReminderError::Notifier(if stderr.is_empty() {
            format!("{} exited with {}", self.program, output.status)
        } else {
            format!("{} exited with {}: {stderr}", self.program, output.status)
        }))
    }
}

/// Outcome of a notification after retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered { attempts: u32 },
    Failed { attempts: u32 },
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered { .. })
    }
}

/// Delivers notifications through a backend with retry
pub struct Notifier<B> {
    backend: B,
    policy: RetryPolicy,
}

impl<B: NotifyBackend> Notifier<B> {
    pub fn new(backend: B) -> Self {
        Self::with_policy(backend, RetryPolicy::NOTIFY)
    }

    pub fn with_policy(backend: B, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    /// Try to show `request`; failure is logged, never returned
    pub async fn deliver(&self, request: &NotificationRequest) -> Delivery {
        let args = request.args();
        let args = args.as_slice();
        let backend = &self.backend;

        let result = self
            .policy
            .run("Desktop notification", |attempt| async move {
                backend.send(args).await.map(|()| attempt)
            })
            .await;

        match result {
            Ok(attempts) => {
                info!(
                    "Notification shown ({} urgency, attempt {attempts})",
                    request.urgency
                );
                Delivery::Delivered { attempts }
            }
            Err(e) => {
                warn!(
                    "Failed to show notification after {} attempts: {e}",
                    self.policy.max_attempts
                );
                warn!("{INSTALL_HINT}");
                Delivery::Failed {
                    attempts: self.policy.max_attempts,
                }
            }
        }
    }
}
