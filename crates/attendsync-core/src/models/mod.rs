//! Data models for attendsync

mod attendance;
mod sync_payload;
mod user;

pub use attendance::{AttendanceRecord, AttendanceType, Timestamp, DEFAULT_LOCATION};
pub use sync_payload::SyncPayload;
pub use user::{User, UserUpdate};
