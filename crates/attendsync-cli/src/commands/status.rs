use attendsync_core::AttendanceRecord;

use crate::commands::common::{format_record_lines, require_user, start_app, StatusView};
use crate::config_file::ResolvedSettings;
use crate::error::CliError;

pub fn run_status(settings: &ResolvedSettings, as_json: bool) -> Result<(), CliError> {
    let (app, report) = start_app(settings)?;
    let user = require_user(&report)?;
    let session = app.session();

    let today = session.today_records(&user.id)?;
    let view = StatusView {
        user_id: user.id.clone(),
        name: user.name.clone(),
        status: session.current_status(&user.id)?,
        today,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{} ({}) is currently {}", view.name, view.user_id, view.status);
    if view.today.is_empty() {
        println!("No records today.");
    }
    for line in format_record_lines(&view.today) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_history(
    settings: &ResolvedSettings,
    user: Option<&str>,
    limit: usize,
    as_json: bool,
) -> Result<(), CliError> {
    let (app, _) = start_app(settings)?;
    let records: Vec<AttendanceRecord> = app.session().history(user, limit)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No records.");
    } else {
        for line in format_record_lines(&records) {
            println!("{line}");
        }
    }
    Ok(())
}
