//! Attendance record model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Location stamped on events recorded without an explicit one.
pub const DEFAULT_LOCATION: &str = "Online";

/// Direction of a finger event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceType {
    /// Finger in (arrival)
    In,
    /// Finger out (departure)
    #[default]
    Out,
}

impl AttendanceType {
    /// Human-readable label used by front ends
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::In => "Finger In",
            Self::Out => "Finger Out",
        }
    }
}

impl fmt::Display for AttendanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => f.write_str("in"),
            Self::Out => f.write_str("out"),
        }
    }
}

impl FromStr for AttendanceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(Error::InvalidInput(format!(
                "attendance type must be 'in' or 'out', got '{other}'"
            ))),
        }
    }
}

/// Point in time as stored on the wire (RFC 3339 text).
///
/// The raw text is kept as-is so records written by other devices survive a
/// round trip even when their timestamp cannot be parsed. Parsing happens on
/// demand, where ordering or day filtering needs it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Format an instant with millisecond precision and a `Z` suffix
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Wrap raw text without validating it
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw stored text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into an instant, `None` when the text is not RFC 3339
    #[must_use]
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.0.trim())
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::from_datetime(at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single finger in/out event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Identifier, unique per device but not across devices
    pub id: String,
    /// Owning user's id
    pub user_id: String,
    /// In or out
    #[serde(rename = "type")]
    pub kind: AttendanceType,
    /// When the event happened
    pub timestamp: Timestamp,
    /// Free-text location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl AttendanceRecord {
    /// Create a record at the given instant
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        kind: AttendanceType,
        at: DateTime<Utc>,
        location: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            kind,
            timestamp: Timestamp::from_datetime(at),
            location,
        }
    }

    /// Parsed timestamp, failing with `MalformedRecord` when unparseable
    pub fn instant(&self) -> Result<DateTime<Utc>> {
        self.timestamp
            .parse()
            .ok_or_else(|| Error::MalformedRecord {
                id: self.id.clone(),
                timestamp: self.timestamp.as_str().to_string(),
            })
    }
}
