//! Shared services used across clients.

mod attendance;

pub use attendance::{AttendanceService, StartupReport};
