//! Attendance record identifier generation

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::IdStrategy;

/// Produces identifiers for new attendance records
pub trait IdGenerator {
    fn next_id(&self, now: DateTime<Utc>) -> String;
}

/// Unix milliseconds as a decimal string.
///
/// Two devices recording in the same millisecond produce the same id; merge
/// keeps whichever copy it sees first.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdGenerator;

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self, now: DateTime<Utc>) -> String {
        now.timestamp_millis().to_string()
    }
}

/// UUID v7 (time-sortable, collision-free across devices)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self, _now: DateTime<Utc>) -> String {
        Uuid::now_v7().to_string()
    }
}

impl IdGenerator for IdStrategy {
    fn next_id(&self, now: DateTime<Utc>) -> String {
        match self {
            Self::Timestamp => TimestampIdGenerator.next_id(now),
            Self::Uuid => UuidIdGenerator.next_id(now),
        }
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self, now: DateTime<Utc>) -> String {
        (**self).next_id(now)
    }
}
