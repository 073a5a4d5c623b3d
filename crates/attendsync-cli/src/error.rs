use std::io;

use attendsync_core::AttendanceType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] attendsync_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Not signed in. Run `attendsync login` first.")]
    NotLoggedIn,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Already recorded finger {0} as the latest event today")]
    AlreadyRecorded(AttendanceType),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Nothing to update")]
    EmptyUpdate,
    #[error("Configuration error: {0}")]
    Config(String),
}
