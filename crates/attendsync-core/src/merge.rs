//! Attendance record reconciliation.
//!
//! Two devices' attendance lists are combined by concatenating them (local
//! first), keeping the first occurrence of every id, and ordering the result
//! by timestamp. A record is never edited by a merge, only kept or dropped.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::AttendanceRecord;

/// Merge a device-local attendance list with a remote one.
///
/// Records sharing an `id` collapse to the first one seen in `local ++ remote`
/// order, so a local copy always beats a remote copy. The survivors are sorted
/// ascending by timestamp with a stable sort, so equal timestamps keep their
/// de-duplicated order.
///
/// Fails with [`Error::MalformedRecord`](crate::Error::MalformedRecord) for the
/// whole batch when a surviving record's timestamp cannot be parsed.
///
/// # Examples
///
/// ```
/// use attendsync_core::merge_attendance;
///
/// let merged = merge_attendance(&[], &[]).unwrap();
/// assert!(merged.is_empty());
/// ```
pub fn merge_attendance(
    local: &[AttendanceRecord],
    remote: &[AttendanceRecord],
) -> Result<Vec<AttendanceRecord>> {
    let mut seen = HashSet::with_capacity(local.len() + remote.len());
    let mut keyed = Vec::with_capacity(local.len() + remote.len());

    for record in local.iter().chain(remote) {
        if !seen.insert(record.id.as_str()) {
            continue;
        }
        keyed.push((record.instant()?, record));
    }

    // `sort_by_key` is stable.
    keyed.sort_by_key(|(at, _)| *at);

    Ok(keyed.into_iter().map(|(_, record)| record.clone()).collect())
}
