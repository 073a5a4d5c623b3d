//! Storage key layout and identifier strategy shared by all clients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::util::normalize_text_option;

pub const DEFAULT_SYNC_KEY: &str = "attendanceSync";
pub const DEFAULT_ATTENDANCE_KEY: &str = "attendanceData";
pub const DEFAULT_USERS_KEY: &str = "usersData";
pub const DEFAULT_CURRENT_USER_KEY: &str = "currentUser";

/// Keys under which each piece of state lives in the key-value store.
///
/// `sync` is the shared slot standing in for the cloud; the rest are
/// device-local.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageKeys {
    pub sync: String,
    pub attendance: String,
    pub users: String,
    pub current_user: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            sync: DEFAULT_SYNC_KEY.to_string(),
            attendance: DEFAULT_ATTENDANCE_KEY.to_string(),
            users: DEFAULT_USERS_KEY.to_string(),
            current_user: DEFAULT_CURRENT_USER_KEY.to_string(),
        }
    }
}

impl StorageKeys {
    fn named(&self) -> [(&'static str, &str); 4] {
        [
            ("sync", self.sync.as_str()),
            ("attendance", self.attendance.as_str()),
            ("users", self.users.as_str()),
            ("current_user", self.current_user.as_str()),
        ]
    }

    /// Reject layouts where two pieces of state share a key
    pub fn validate(&self) -> Result<(), Error> {
        let named = self.named();
        for (i, (name, key)) in named.iter().enumerate() {
            if let Some((other, _)) = named[i + 1..].iter().find(|(_, other)| other == key) {
                return Err(Error::InvalidInput(format!(
                    "storage keys '{name}' and '{other}' both use '{key}'"
                )));
            }
        }
        Ok(())
    }

    /// Trim keys and fall back to defaults for blank ones
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            sync: normalize_text_option(Some(self.sync)).unwrap_or(defaults.sync),
            attendance: normalize_text_option(Some(self.attendance))
                .unwrap_or(defaults.attendance),
            users: normalize_text_option(Some(self.users)).unwrap_or(defaults.users),
            current_user: normalize_text_option(Some(self.current_user))
                .unwrap_or(defaults.current_user),
        }
    }
}

/// How new attendance record ids are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Unix milliseconds, compatible with records from older clients
    #[default]
    Timestamp,
    /// UUID v7
    Uuid,
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp => f.write_str("timestamp"),
            Self::Uuid => f.write_str("uuid"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timestamp" => Ok(Self::Timestamp),
            "uuid" => Ok(Self::Uuid),
            other => Err(Error::InvalidInput(format!(
                "id strategy must be 'timestamp' or 'uuid', got '{other}'"
            ))),
        }
    }
}
