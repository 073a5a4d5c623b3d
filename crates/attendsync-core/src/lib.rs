//! attendsync-core - Core library for attendsync
//!
//! This crate contains the attendance models, the record merge engine, the
//! key-value storage layer, and the shared sync slot lifecycle used by every
//! attendsync client.
//!
//! The "cloud" is a single key in a [`KeyValueStore`]: devices pull it and
//! merge its records into their local list on start, and overwrite it with
//! their local list on logout. Whichever device writes last wins.

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod ids;
pub mod merge;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod sync;
pub mod users;
pub mod util;

pub use error::{Error, Result};
pub use merge::merge_attendance;
pub use models::{AttendanceRecord, AttendanceType, SyncPayload, User};
pub use storage::KeyValueStore;
pub use sync::SyncLifecycle;
