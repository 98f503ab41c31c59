//! # Core Module
//!
//! Configuration, error types, and the retry policy shared by every stage.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod error;
pub mod retry;

// Re-export commonly used items
pub use config::{config_path, home_dir, Config};
pub use error::{ReminderError, Result};
pub use retry::RetryPolicy;
