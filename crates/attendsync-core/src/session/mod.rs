//! Device-local attendance list and per-user daily view

use chrono::{NaiveDate, TimeZone};

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::models::{AttendanceRecord, AttendanceType};
use crate::storage::{read_json, write_json, KeyValueStore};
use crate::util::normalize_text_option;

/// Owner of the attendance list stored under the device-local key.
///
/// `tz` decides which calendar day a record belongs to.
#[derive(Debug)]
pub struct AttendanceSession<'a, S, C, G, Tz> {
    store: &'a S,
    clock: &'a C,
    ids: &'a G,
    key: &'a str,
    tz: Tz,
}

impl<'a, S, C, G, Tz> AttendanceSession<'a, S, C, G, Tz>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
    Tz: TimeZone,
{
    pub const fn new(store: &'a S, clock: &'a C, ids: &'a G, key: &'a str, tz: Tz) -> Self {
        Self {
            store,
            clock,
            ids,
            key,
            tz,
        }
    }

    /// The full local list in stored order; empty when never written
    pub fn records(&self) -> Result<Vec<AttendanceRecord>> {
        Ok(read_json(self.store, self.key)?.unwrap_or_default())
    }

    /// Replace the full local list
    pub fn replace_records(&self, records: &[AttendanceRecord]) -> Result<()> {
        write_json(self.store, self.key, records)
    }

    /// Calendar day of "now" in this session's time zone
    pub fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.tz).date_naive()
    }

    /// Records of `user_id` on `day`, in chronological order.
    ///
    /// Records whose timestamp cannot be parsed belong to no day and are
    /// skipped.
    pub fn records_on(&self, user_id: &str, day: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let mut matching = Vec::new();
        for record in self.records()? {
            if record.user_id != user_id {
                continue;
            }
            let Some(at) = record.timestamp.parse() else {
                tracing::warn!(
                    "Skipping attendance record {} with unparseable timestamp {:?}",
                    record.id,
                    record.timestamp.as_str()
                );
                continue;
            };
            if at.with_timezone(&self.tz).date_naive() == day {
                matching.push((at, record));
            }
        }

        matching.sort_by_key(|(at, _)| *at);
        Ok(matching.into_iter().map(|(_, record)| record).collect())
    }

    /// Records of `user_id` for today
    pub fn today_records(&self, user_id: &str) -> Result<Vec<AttendanceRecord>> {
        self.records_on(user_id, self.today())
    }

    /// Type of the user's latest record today, `Out` when there is none
    pub fn current_status(&self, user_id: &str) -> Result<AttendanceType> {
        Ok(self
            .today_records(user_id)?
            .last()
            .map_or(AttendanceType::Out, |record| record.kind))
    }

    /// Most recent records of a user (or everyone), newest first
    pub fn history(&self, user_id: Option<&str>, limit: usize) -> Result<Vec<AttendanceRecord>> {
        let mut records: Vec<_> = self
            .records()?
            .into_iter()
            .filter(|record| user_id.map_or(true, |id| record.user_id == id))
            .filter_map(|record| match record.timestamp.parse() {
                Some(at) => Some((at, record)),
                None => {
                    tracing::warn!(
                        "Leaving record {} with unparseable timestamp {:?} out of history",
                        record.id,
                        record.timestamp.as_str()
                    );
                    None
                }
            })
            .collect();

        records.sort_by(|(a, _), (b, _)| b.cmp(a));
        Ok(records
            .into_iter()
            .take(limit)
            .map(|(_, record)| record)
            .collect())
    }

    /// Create a record stamped with the clock, append it to the local list
    /// and persist the whole list.
    pub fn record_event(
        &self,
        user_id: &str,
        kind: AttendanceType,
        location: Option<&str>,
    ) -> Result<AttendanceRecord> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(Error::InvalidInput("user id must not be empty".to_string()));
        }

        let now = self.clock.now();
        let record = AttendanceRecord::new(
            self.ids.next_id(now),
            user_id,
            kind,
            now,
            normalize_text_option(location.map(str::to_string)),
        );

        let mut records = self.records()?;
        records.push(record.clone());
        self.replace_records(&records)?;

        tracing::info!("Recorded finger {} for user {} ({})", kind, user_id, record.id);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ids::TimestampIdGenerator;
    use crate::models::Timestamp;
    use crate::storage::MemoryStore;
    use chrono::{DateTime, Duration, FixedOffset, Utc};
    use pretty_assertions::assert_eq;

    const KEY: &str = "attendanceData";

    struct FixedIds(&'static str);

    impl IdGenerator for FixedIds {
        fn next_id(&self, _now: DateTime<Utc>) -> String {
            self.0.to_string()
        }
    }

    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_status_defaults_to_out() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        assert_eq!(session.current_status("0001").unwrap(), AttendanceType::Out);
        assert!(session.today_records("0001").unwrap().is_empty());
    }

    #[test]
    fn test_record_event_appends_and_persists() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        let record = session
            .record_event("0001", AttendanceType::In, Some(" Online "))
            .unwrap();

        assert_eq!(record.id, "1705305600000");
        assert_eq!(record.location.as_deref(), Some("Online"));
        assert_eq!(record.timestamp, Timestamp::from_datetime(morning()));

        let raw = store.get(KEY).unwrap().unwrap();
        let stored: Vec<AttendanceRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![record]);
        assert_eq!(session.current_status("0001").unwrap(), AttendanceType::In);
    }

    #[test]
    fn test_status_follows_latest_record_of_the_day() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        session.record_event("0001", AttendanceType::In, None).unwrap();
        clock.advance(Duration::hours(9));
        session.record_event("0001", AttendanceType::Out, None).unwrap();
        session.record_event("0002", AttendanceType::In, None).unwrap();

        assert_eq!(session.today_records("0001").unwrap().len(), 2);
        assert_eq!(session.current_status("0001").unwrap(), AttendanceType::Out);
        assert_eq!(session.current_status("0002").unwrap(), AttendanceType::In);
    }

    #[test]
    fn test_status_uses_chronology_not_storage_order() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning() + Duration::hours(10));
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        let late_out = AttendanceRecord::new(
            "2",
            "0001",
            AttendanceType::Out,
            morning() + Duration::hours(9),
            None,
        );
        let early_in = AttendanceRecord::new("1", "0001", AttendanceType::In, morning(), None);
        session.replace_records(&[late_out, early_in]).unwrap();

        let today = session.today_records("0001").unwrap();
        assert_eq!(today[0].id, "1");
        assert_eq!(session.current_status("0001").unwrap(), AttendanceType::Out);
    }

    #[test]
    fn test_yesterday_does_not_count() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        session.record_event("0001", AttendanceType::In, None).unwrap();
        clock.advance(Duration::days(1));

        assert!(session.today_records("0001").unwrap().is_empty());
        assert_eq!(session.current_status("0001").unwrap(), AttendanceType::Out);
    }

    #[test]
    fn test_day_boundary_follows_time_zone() {
        let store = MemoryStore::new();
        // 23:30 UTC on the 14th is 06:30 on the 15th in UTC+7.
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 14, 23, 30, 0).unwrap());
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, jakarta);

        session.record_event("0001", AttendanceType::In, None).unwrap();

        assert_eq!(session.today(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(session.today_records("0001").unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_records_are_skipped_by_day_filter() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        let mut broken = AttendanceRecord::new("x", "0001", AttendanceType::In, morning(), None);
        broken.timestamp = Timestamp::from_raw("Invalid Date");
        session.replace_records(&[broken]).unwrap();

        assert!(session.today_records("0001").unwrap().is_empty());
    }

    #[test]
    fn test_forced_id_collisions_are_stored_as_is() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        let ids = FixedIds("same");
        let session = AttendanceSession::new(&store, &clock, &ids, KEY, Utc);

        session.record_event("0001", AttendanceType::In, None).unwrap();
        session.record_event("0001", AttendanceType::Out, None).unwrap();

        let records = session.records().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.id == "same"));
    }

    #[test]
    fn test_history_is_newest_first_and_limited() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        for _ in 0..3 {
            session.record_event("0001", AttendanceType::In, None).unwrap();
            clock.advance(Duration::minutes(1));
        }
        session.record_event("0002", AttendanceType::In, None).unwrap();

        let history = session.history(Some("0001"), 2).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].timestamp.parse() > history[1].timestamp.parse());
        assert_eq!(session.history(None, 10).unwrap().len(), 4);
    }

    #[test]
    fn test_history_leaves_out_malformed_records() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        let valid = session.record_event("0001", AttendanceType::In, None).unwrap();
        let mut broken = AttendanceRecord::new("x", "0001", AttendanceType::Out, morning(), None);
        broken.timestamp = Timestamp::from_raw("Invalid Date");
        session.replace_records(&[valid.clone(), broken]).unwrap();

        assert_eq!(session.history(Some("0001"), 10).unwrap(), vec![valid]);
        assert_eq!(session.records().unwrap().len(), 2);
    }

    #[test]
    fn test_blank_user_is_rejected() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        assert!(matches!(
            session.record_event("  ", AttendanceType::In, None),
            Err(Error::InvalidInput(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_local_list_is_reported() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(morning());
        store.set(KEY, "oops").unwrap();
        let session = AttendanceSession::new(&store, &clock, &TimestampIdGenerator, KEY, Utc);

        assert!(matches!(
            session.record_event("0001", AttendanceType::In, None),
            Err(Error::CorruptLocalState { .. })
        ));
    }
}
