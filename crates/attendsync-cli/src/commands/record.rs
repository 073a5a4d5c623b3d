use attendsync_core::AttendanceType;

use crate::commands::common::{format_record_line, require_user, start_app};
use crate::config_file::ResolvedSettings;
use crate::error::CliError;

pub fn run_record(
    settings: &ResolvedSettings,
    kind: AttendanceType,
    location: &str,
) -> Result<(), CliError> {
    let (app, report) = start_app(settings)?;
    let user = require_user(&report)?;
    let session = app.session();

    ensure_transition(session.current_status(&user.id)?, kind)?;

    let record = session.record_event(&user.id, kind, Some(location))?;
    println!("{}", format_record_line(&record, &chrono::Local));
    Ok(())
}

/// The same event type cannot be recorded twice in a row on one day.
pub fn ensure_transition(current: AttendanceType, next: AttendanceType) -> Result<(), CliError> {
    if current == next {
        Err(CliError::AlreadyRecorded(next))
    } else {
        Ok(())
    }
}
