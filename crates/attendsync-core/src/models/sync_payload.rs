//! Shared sync payload model

use serde::{Deserialize, Serialize};

use super::{AttendanceRecord, User};

/// The single value living in the shared sync slot.
///
/// Every write replaces the whole payload; there is no partial update and no
/// version counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    pub attendance_data: Vec<AttendanceRecord>,
    pub users: Vec<User>,
    /// Time of the push that wrote this payload (Unix ms)
    pub last_updated: i64,
}

impl SyncPayload {
    /// Payload with the given contents; `last_updated` is stamped on push
    #[must_use]
    pub const fn new(attendance_data: Vec<AttendanceRecord>, users: Vec<User>) -> Self {
        Self {
            attendance_data,
            users,
            last_updated: 0,
        }
    }

    /// Nothing recorded and no users
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attendance_data.is_empty() && self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_wire_field_names() {
        let json = serde_json::to_value(SyncPayload::default()).unwrap();
        assert!(json.get("attendanceData").is_some());
        assert!(json.get("users").is_some());
        assert_eq!(json["lastUpdated"], 0);
    }

    #[test]
    fn test_payload_requires_all_fields() {
        assert!(serde_json::from_str::<SyncPayload>(r#"{"users":[],"lastUpdated":1}"#).is_err());
    }
}
