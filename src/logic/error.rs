// Error types of the registration engine.
use std::io;

use thiserror::Error;

use crate::logic::types::MatchId;

// Everything that can make a registration call fail.
// A waitlisted registration is not an error, neither is a vacancy with nobody to promote.
#[derive(Debug, Error)]
pub enum RegistrationError {
    // Unknown match, player or registration.
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: u32 },

    // An administrative override would exceed the hard total of the match.
    #[error("match {match_id} is full: {registered} of {total} players registered")]
    Conflict { match_id: MatchId, registered: i32, total: i32 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // The player is already active on the other team and the request does not ask for a switch.
    #[error("rejected: {0}")]
    StructuralRejection(String),

    // An external write guard refused the call before it reached the ledger.
    #[error("write vetoed: {0}")]
    Vetoed(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl RegistrationError {
    pub fn not_found(what: &'static str, id: u32) -> Self {
        Self::NotFound { what, id }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RegistrationError>;

// Problems while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("could not parse config file {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
}
