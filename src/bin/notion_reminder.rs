use anyhow::{Context, Result};
use log::{error, info};

use notion_reminder::core::{home_dir, Config, ReminderError};
use notion_reminder::features::notifications::{Notifier, NotifySend};
use notion_reminder::features::reminders::NotionClient;
use notion_reminder::runner::{exit_code, run, RunContext};

/// Log a fatal error and terminate with its exit status
fn fail(stage: &str, e: &ReminderError) -> ! {
    error!("Error {stage}: {e}");
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let home = home_dir().unwrap_or_else(|e| fail("loading config", &e));
    let config = Config::load(&home).unwrap_or_else(|e| fail("loading config", &e));

    let client = NotionClient::new(&config).context("failed to create HTTP client")?;
    let notifier = Notifier::new(NotifySend::new());
    let ctx = RunContext::new(home, config);

    let result = run(&ctx, &client, &notifier).await;
    match &result {
        Ok(outcome) => info!(
            "[{}] Done: {} reminder(s), notification {}",
            ctx.run_id,
            outcome.reminders,
            if outcome.delivery.is_delivered() {
                "shown"
            } else {
                "not shown"
            }
        ),
        Err(e) => error!("[{}] Error fetching reminders: {e}", ctx.run_id),
    }

    let code = exit_code(&result);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
