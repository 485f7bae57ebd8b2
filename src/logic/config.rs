// Configuration of the registration engine, read from a TOML file.
use std::{path::{Path, PathBuf}, sync::Arc};

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::logic::{error::ConfigError, io::read_text_file, types::PlayerId, write_guard::{AllowAll, ProtectedAccounts, WriteGuard}};

#[derive(Debug)]
#[derive(Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Directory of the database file. Without one the database lives in memory.
    pub database_dir: Option<PathBuf>,

    // SQLite has a single writer, more connections only help readers.
    pub max_connections: u32,

    // Used when RUST_LOG is not set.
    pub log_filter: String,

    // Accounts whose changes are vetoed.
    pub protected_accounts: Vec<PlayerId>,

    pub reminder_lead_hours: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_dir: None,
            max_connections: 1,
            log_filter: "info".to_string(),
            protected_accounts: Vec::new(),
            reminder_lead_hours: 24,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = read_text_file(path)?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn reminder_lead(&self) -> Duration {
        Duration::hours(self.reminder_lead_hours)
    }

    // Build the write guard this configuration asks for.
    pub fn write_guard(&self) -> Arc<dyn WriteGuard> {
        match self.protected_accounts.is_empty() {
            true => Arc::new(AllowAll),
            false => Arc::new(ProtectedAccounts::build(self.protected_accounts.iter().copied())),
        }
    }
}
