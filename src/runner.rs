//! # Reminder Check
//!
//! One pass of the tool: query Notion (with retry), normalize pages,
//! summarize, and notify. Config loading happens before this; the caller
//! decides the exit status from the returned result.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::{Config, Result, RetryPolicy};
use crate::features::notifications::{
    resolve_icon, Delivery, NotificationRequest, Notifier, NotifyBackend,
};
use crate::features::reminders::{extract_all, summarize, Digest, PageSource};
use log::info;
use std::path::PathBuf;
use uuid::Uuid;

/// Inputs resolved once at startup
#[derive(Debug, Clone)]
pub struct RunContext {
    pub home: PathBuf,
    pub config: Config,
    /// Prefix for every log line of this run
    pub run_id: Uuid,
}

impl RunContext {
    pub fn new(home: PathBuf, config: Config) -> Self {
        Self {
            home,
            config,
            run_id: Uuid::new_v4(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub reminders: usize,
    pub delivery: Delivery,
}

/// Process exit status for a finished run: only a terminal fetch failure
/// is nonzero, a notification that never showed is not
pub fn exit_code(result: &Result<Outcome>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}

/// Run a single check.
///
/// Returns an error only when the Notion query exhausts its retry budget.
/// Notification failures are reported through [`Outcome::delivery`].
pub async fn run<S, B>(ctx: &RunContext, source: &S, notifier: &Notifier<B>) -> Result<Outcome>
where
    S: PageSource + ?Sized,
    B: NotifyBackend,
{
    let run_id = ctx.run_id;
    info!("[{run_id}] Checking Notion for pending reminders...");

    let pages = RetryPolicy::FETCH
        .run("Notion query", |_| source.query_pending())
        .await?;

    let reminders = extract_all(&pages);
    let icon = resolve_icon(&ctx.home);

    let delivery = match summarize(&reminders, &ctx.config.database_id) {
        Digest::Idle => {
            info!("[{run_id}] No pending reminders found!");
            notifier.deliver(&NotificationRequest::idle(icon)).await
        }
        Digest::Pending(summary) => {
            info!("[{run_id}] Found {} pending reminder(s)", summary.count);
            for (i, reminder) in reminders.iter().enumerate() {
                info!("[{run_id}]   {}", reminder.log_line(i + 1));
            }

            let delivery = notifier
                .deliver(&NotificationRequest::summary(&summary, icon))
                .await;
            info!(
                "[{run_id}] Click notification to open: {}",
                summary.database_url
            );
            delivery
        }
    };

    Ok(Outcome {
        reminders: reminders.len(),
        delivery,
    })
}
