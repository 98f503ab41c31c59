//! # Configuration
//!
//! Loads the Notion credentials from the per-user key/value file at
//! `~/.config/notion-reminder/config.conf`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::error::{ReminderError, Result};
use log::debug;
use std::path::{Path, PathBuf};

pub const TOKEN_KEY: &str = "NOTION_TOKEN";
pub const DATABASE_ID_KEY: &str = "DATABASE_ID";

/// The current user's home directory, using the platform lookup
pub fn home_dir() -> Result<PathBuf> {
    resolve_home(dirs::home_dir())
}

fn resolve_home(candidate: Option<PathBuf>) -> Result<PathBuf> {
    candidate
        .filter(|h| !h.as_os_str().is_empty())
        .ok_or(ReminderError::HomeMissing)
}

/// Location of the config file relative to the user's home directory
pub fn config_path(home: &Path) -> PathBuf {
    home.join(".config").join("notion-reminder").join("config.conf")
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub database_id: String,
}

// Keep the bearer token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("database_id", &self.database_id)
            .finish()
    }
}

impl Config {
    /// Load and validate the config file under `home`
    pub fn load(home: &Path) -> Result<Self> {
        Self::load_from(&config_path(home))
    }

    /// Load and validate a config file at an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ReminderError::ConfigMissing {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        debug!("Read config from {}", path.display());
        Self::parse(&contents)
    }

    /// Parse `KEY=VALUE` directives.
    ///
    /// Blank lines, `#` comments, lines without `=`, and unknown keys are
    /// skipped. Later directives override earlier ones.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut token = String::new();
        let mut database_id = String::new();

        for line in contents.split('\n') {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            match key.trim() {
                TOKEN_KEY => token = value.trim().to_string(),
                DATABASE_ID_KEY => database_id = value.trim().to_string(),
                _ => {}
            }
        }

        let mut missing = Vec::new();
        if token.is_empty() {
            missing.push(TOKEN_KEY);
        }
        if database_id.is_empty() {
            missing.push(DATABASE_ID_KEY);
        }
        if !missing.is_empty() {
            return Err(ReminderError::ConfigIncomplete(missing));
        }

        Ok(Self { token, database_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic() {
        let config = Config::parse("NOTION_TOKEN=secret_abc\nDATABASE_ID=db123\n").unwrap();
        assert_eq!(config.token, "secret_abc");
        assert_eq!(config.database_id, "db123");
    }

    #[test]
    fn test_parse_trims_key_and_value() {
        let config = Config::parse("  NOTION_TOKEN =  tok  \n\tDATABASE_ID\t=\tabc \n").unwrap();
        assert_eq!(config.token, "tok");
        assert_eq!(config.database_id, "abc");
    }

    #[test]
    fn test_parse_skips_comments_blanks_and_unknown_keys() {
        let text = "# Notion reminder config\n\nSOMETHING_ELSE=1\nnot a directive\n   # indented comment\nNOTION_TOKEN=tok\nDATABASE_ID=abc\n";
        let config = Config::parse(text).unwrap();
        assert_eq!(config.token, "tok");
        assert_eq!(config.database_id, "abc");
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let config = Config::parse("NOTION_TOKEN=a=b=c\nDATABASE_ID=abc").unwrap();
        assert_eq!(config.token, "a=b=c");
    }

    #[test]
    fn test_parse_commented_key_is_ignored() {
        let err = Config::parse("#NOTION_TOKEN=tok\nDATABASE_ID=abc").unwrap_err();
        match err {
            ReminderError::ConfigIncomplete(missing) => assert_eq!(missing, vec![TOKEN_KEY]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_value_is_incomplete() {
        let err = Config::parse("NOTION_TOKEN=tok\nDATABASE_ID=   \n").unwrap_err();
        match err {
            ReminderError::ConfigIncomplete(missing) => {
                assert_eq!(missing, vec![DATABASE_ID_KEY])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_file_reports_both_keys() {
        let err = Config::parse("").unwrap_err();
        assert!(matches!(err, ReminderError::ConfigIncomplete(_)));
        assert!(err.to_string().contains("NOTION_TOKEN and DATABASE_ID"));
    }

    #[test]
    fn test_parse_last_value_wins() {
        let config = Config::parse("NOTION_TOKEN=old\nNOTION_TOKEN=new\nDATABASE_ID=abc").unwrap();
        assert_eq!(config.token, "new");
    }

    #[test]
    fn test_parse_handles_crlf() {
        let config = Config::parse("NOTION_TOKEN=tok\r\nDATABASE_ID=abc\r\n").unwrap();
        assert_eq!(config.token, "tok");
        assert_eq!(config.database_id, "abc");
    }

    #[test]
    fn test_config_path_layout() {
        let path = config_path(Path::new("/home/alice"));
        assert_eq!(
            path,
            PathBuf::from("/home/alice/.config/notion-reminder/config.conf")
        );
    }

    #[test]
    fn test_resolve_home() {
        assert_eq!(
            resolve_home(Some(PathBuf::from("/home/alice"))).unwrap(),
            PathBuf::from("/home/alice")
        );
        assert!(matches!(
            resolve_home(None).unwrap_err(),
            ReminderError::HomeMissing
        ));
        assert!(matches!(
            resolve_home(Some(PathBuf::new())).unwrap_err(),
            ReminderError::HomeMissing
        ));
    }

    #[test]
    fn test_load_reads_file_under_home() {
        let home = TempDir::new().unwrap();
        let path = config_path(home.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "NOTION_TOKEN=tok\nDATABASE_ID=abc\n").unwrap();

        let config = Config::load(home.path()).unwrap();
        assert_eq!(config.token, "tok");
        assert_eq!(config.database_id, "abc");
    }

    #[test]
    fn test_load_missing_file() {
        let home = TempDir::new().unwrap();
        let err = Config::load(home.path()).unwrap_err();
        assert!(matches!(err, ReminderError::ConfigMissing { .. }));
        assert!(err.to_string().contains("Please run setup script first"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::parse("NOTION_TOKEN=secret_abc\nDATABASE_ID=abc").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret_abc"));
        assert!(rendered.contains("abc"));
    }
}
