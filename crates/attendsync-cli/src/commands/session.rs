use attendsync_core::services::StartupReport;

use crate::commands::common::{open_app, start_app};
use crate::config_file::ResolvedSettings;
use crate::error::CliError;

pub fn run_init(settings: &ResolvedSettings) -> Result<(), CliError> {
    let (app, report) = start_app(settings)?;
    for line in format_startup_report(&report) {
        println!("{line}");
    }
    println!("Store: {}", settings.store_path.display());
    println!("Users: {}", app.users().all()?.len());
    Ok(())
}

pub fn run_login(
    settings: &ResolvedSettings,
    username: &str,
    password: &str,
) -> Result<(), CliError> {
    let (app, _) = start_app(settings)?;
    let user = app
        .login(username.trim(), password)?
        .ok_or(CliError::InvalidCredentials)?;
    println!("Signed in as {} ({})", user.name, user.id);
    Ok(())
}

pub fn run_logout(settings: &ResolvedSettings) -> Result<(), CliError> {
    // Flushes without reconciling first.
    let app = open_app(settings)?;
    let previous = app.current_user()?;
    let pushed = app.logout()?;

    match previous {
        Some(user) => println!("Signed out {}", user.id),
        None => println!("No user was signed in"),
    }
    println!(
        "Pushed {} records to the sync slot",
        pushed.attendance_data.len()
    );
    Ok(())
}

pub fn format_startup_report(report: &StartupReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.initialized_sync {
        lines.push("Initialized empty sync slot".to_string());
    }
    match report.reconciled_records {
        Some(count) => lines.push(format!("Local list holds {count} records after reconcile")),
        None => lines.push("Sync slot is empty; nothing to reconcile".to_string()),
    }
    if let Some(user) = &report.current_user {
        lines.push(format!("Signed in as {} ({})", user.name, user.id));
    }
    lines
}
