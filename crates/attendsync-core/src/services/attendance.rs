//! Attendance service wiring storage, sync slot, session and users together.

use chrono::{Local, TimeZone};

use crate::clock::{Clock, SystemClock};
use crate::config::{IdStrategy, StorageKeys};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::merge::merge_attendance;
use crate::models::{SyncPayload, User};
use crate::session::AttendanceSession;
use crate::storage::{read_json, write_json, KeyValueStore};
use crate::sync::SyncLifecycle;
use crate::users::UserDirectory;

/// What happened during [`AttendanceService::start`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    /// The sync slot was empty and has been seeded
    pub initialized_sync: bool,
    /// Size of the local list after merging with the sync slot
    pub reconciled_records: Option<usize>,
    /// User restored from the previous sign-in
    pub current_user: Option<User>,
}

/// One device's view of the attendance system.
///
/// Reconciliation happens at fixed points: [`start`](Self::start) merges the
/// sync slot into the local list, [`logout`](Self::logout) and
/// [`flush`](Self::flush) overwrite the slot with the local list.
pub struct AttendanceService<S, C = SystemClock, G = IdStrategy, Tz = Local> {
    store: S,
    clock: C,
    ids: G,
    tz: Tz,
    keys: StorageKeys,
}

impl<S: KeyValueStore> AttendanceService<S> {
    /// Wall clock, local time zone, and the given id strategy
    pub fn with_defaults(store: S, ids: IdStrategy, keys: StorageKeys) -> Self {
        Self::new(store, SystemClock, ids, Local, keys)
    }
}

impl<S, C, G, Tz> AttendanceService<S, C, G, Tz>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
    Tz: TimeZone,
{
    pub const fn new(store: S, clock: C, ids: G, tz: Tz, keys: StorageKeys) -> Self {
        Self {
            store,
            clock,
            ids,
            tz,
            keys,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// The shared sync slot
    pub fn sync_slot(&self) -> SyncLifecycle<'_, S, C> {
        SyncLifecycle::new(&self.store, &self.clock, &self.keys.sync)
    }

    /// The device-local attendance list
    pub fn session(&self) -> AttendanceSession<'_, S, C, G, Tz> {
        AttendanceSession::new(
            &self.store,
            &self.clock,
            &self.ids,
            &self.keys.attendance,
            self.tz.clone(),
        )
    }

    /// The credential table
    pub fn users(&self) -> UserDirectory<'_, S> {
        UserDirectory::new(&self.store, &self.keys.users)
    }

    /// Process start: seed the sync slot if needed, provision users,
    /// restore the signed-in user, then pull remote records into the local
    /// list.
    pub fn start(&self) -> Result<StartupReport> {
        let initialized_sync = self.sync_slot().ensure_initialized()?;
        self.users().load_or_seed()?;
        let current_user = self.current_user()?;
        let reconciled_records = self.reconcile()?;

        Ok(StartupReport {
            initialized_sync,
            reconciled_records,
            current_user,
        })
    }

    /// Merge the sync slot's records into the local list.
    ///
    /// Returns the merged length, or `None` when the slot is empty. The slot
    /// itself is not written.
    pub fn reconcile(&self) -> Result<Option<usize>> {
        let Some(remote) = self.sync_slot().pull()? else {
            return Ok(None);
        };

        let session = self.session();
        let local = session.records()?;
        let merged = merge_attendance(&local, &remote.attendance_data)?;
        session.replace_records(&merged)?;

        tracing::info!(
            "Reconciled {} local and {} remote records into {}",
            local.len(),
            remote.attendance_data.len(),
            merged.len()
        );
        Ok(Some(merged.len()))
    }

    /// Overwrite the sync slot with the local list and user table
    pub fn flush(&self) -> Result<SyncPayload> {
        let attendance = self.session().records()?;
        let users = self.users().all()?;
        self.sync_slot().push(SyncPayload::new(attendance, users))
    }

    /// Sign in with plain-text credentials.
    ///
    /// `Ok(None)` for unknown, inactive, or mismatched credentials.
    pub fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.users().authenticate(username, password)? else {
            tracing::info!("Rejected sign-in for '{}'", username);
            return Ok(None);
        };

        let session_user = user.without_password();
        write_json(&self.store, &self.keys.current_user, &session_user)?;
        tracing::info!("Signed in as {}", session_user.id);
        Ok(Some(session_user))
    }

    /// Forget the signed-in user, then flush to the sync slot
    pub fn logout(&self) -> Result<SyncPayload> {
        self.store.remove(&self.keys.current_user)?;
        self.flush()
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        read_json(&self.store, &self.keys.current_user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ids::TimestampIdGenerator;
    use crate::models::{AttendanceRecord, AttendanceType};
    use crate::storage::MemoryStore;
    use crate::users::SEED_STAFF_COUNT;
    use crate::Error;
    use chrono::{DateTime, Duration, Utc};
    use pretty_assertions::assert_eq;

    type TestService<'a> =
        AttendanceService<&'a MemoryStore, FixedClock, TimestampIdGenerator, Utc>;

    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap()
    }

    fn service(store: &MemoryStore) -> TestService<'_> {
        AttendanceService::new(
            store,
            FixedClock::new(morning()),
            TimestampIdGenerator,
            Utc,
            StorageKeys::default(),
        )
    }

    #[test]
    fn test_first_start_seeds_everything() {
        let store = MemoryStore::new();
        let report = service(&store).start().unwrap();

        assert!(report.initialized_sync);
        assert_eq!(report.reconciled_records, Some(0));
        assert_eq!(report.current_user, None);
        assert_eq!(
            service(&store).users().all().unwrap().len(),
            SEED_STAFF_COUNT + 1
        );
    }

    #[test]
    fn test_second_start_leaves_sync_slot_alone() {
        let store = MemoryStore::new();
        service(&store).start().unwrap();
        let slot = store.get("attendanceSync").unwrap();

        let report = service(&store).start().unwrap();
        assert!(!report.initialized_sync);
        assert_eq!(store.get("attendanceSync").unwrap(), slot);
    }

    #[test]
    fn test_login_persists_user_without_password() {
        let store = MemoryStore::new();
        let app = service(&store);
        app.start().unwrap();

        let user = app.login("0001", "0001").unwrap().unwrap();
        assert!(user.password.is_empty());
        assert_eq!(app.current_user().unwrap(), Some(user.clone()));
        assert_eq!(app.start().unwrap().current_user, Some(user));

        assert!(app.login("0001", "bad").unwrap().is_none());
    }

    #[test]
    fn test_logout_clears_user_and_flushes() {
        let store = MemoryStore::new();
        let app = service(&store);
        app.start().unwrap();
        app.login("0001", "0001").unwrap();
        app.session()
            .record_event("0001", AttendanceType::In, Some("Online"))
            .unwrap();
        app.clock().advance(Duration::minutes(1));

        let pushed = app.logout().unwrap();

        assert_eq!(app.current_user().unwrap(), None);
        assert_eq!(pushed.attendance_data.len(), 1);
        assert_eq!(pushed.users.len(), SEED_STAFF_COUNT + 1);
        assert_eq!(pushed.last_updated, (morning() + Duration::minutes(1)).timestamp_millis());
        assert_eq!(app.sync_slot().pull().unwrap(), Some(pushed));
    }

    #[test]
    fn test_reconcile_merges_remote_into_local_only() {
        let store = MemoryStore::new();
        let app = service(&store);
        app.start().unwrap();

        let remote = AttendanceRecord::new("r", "0002", AttendanceType::In, morning(), None);
        app.sync_slot()
            .push(SyncPayload::new(vec![remote.clone()], Vec::new()))
            .unwrap();
        app.clock().advance(Duration::hours(1));
        let local = app
            .session()
            .record_event("0001", AttendanceType::In, None)
            .unwrap();

        assert_eq!(app.reconcile().unwrap(), Some(2));
        assert_eq!(app.session().records().unwrap(), vec![remote, local]);
        assert_eq!(
            app.sync_slot().pull().unwrap().unwrap().attendance_data.len(),
            1
        );
    }

    #[test]
    fn test_reconcile_with_empty_slot_is_none() {
        let store = MemoryStore::new();
        assert_eq!(service(&store).reconcile().unwrap(), None);
    }

    #[test]
    fn test_start_surfaces_corrupt_sync_slot() {
        let store = MemoryStore::new();
        store.set("attendanceSync", "{not json").unwrap();

        assert!(matches!(
            service(&store).start(),
            Err(Error::CorruptSyncState(_))
        ));
    }
}
