use attendsync_core::SyncPayload;
use chrono::{TimeZone, Utc};

use crate::commands::common::{open_app, start_app};
use crate::config_file::ResolvedSettings;
use crate::error::CliError;

pub fn run_sync_push(settings: &ResolvedSettings) -> Result<(), CliError> {
    let app = open_app(settings)?;
    let pushed = app.flush()?;
    println!(
        "Pushed {} records and {} users at {}",
        pushed.attendance_data.len(),
        pushed.users.len(),
        format_sync_timestamp(pushed.last_updated)
    );
    Ok(())
}

pub fn run_sync_pull(settings: &ResolvedSettings, as_json: bool) -> Result<(), CliError> {
    let app = open_app(settings)?;
    let slot = app.sync_slot();
    let payload = slot.pull()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match payload {
        Some(payload) if payload.is_empty() => {
            println!("Sync slot '{}' holds no records or users.", slot.key());
        }
        Some(payload) => {
            for line in format_sync_summary(&payload) {
                println!("{line}");
            }
        }
        None => println!("Sync slot '{}' is empty.", slot.key()),
    }
    Ok(())
}

pub fn run_sync_reconcile(settings: &ResolvedSettings) -> Result<(), CliError> {
    let (_, report) = start_app(settings)?;
    match report.reconciled_records {
        Some(count) => println!("Reconciled; local list holds {count} records"),
        None => println!("Sync slot is empty; nothing to reconcile"),
    }
    Ok(())
}

pub fn format_sync_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms).single().map_or_else(
        || timestamp_ms.to_string(),
        |at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

pub fn format_sync_summary(payload: &SyncPayload) -> Vec<String> {
    vec![
        format!("Last updated: {}", format_sync_timestamp(payload.last_updated)),
        format!("Attendance records: {}", payload.attendance_data.len()),
        format!("Users: {}", payload.users.len()),
    ]
}
