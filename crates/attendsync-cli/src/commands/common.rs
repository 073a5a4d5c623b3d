use std::fmt::Display;
use std::path::PathBuf;

use attendsync_core::db::SqliteStore;
use attendsync_core::models::Timestamp;
use attendsync_core::services::{AttendanceService, StartupReport};
use attendsync_core::{AttendanceRecord, AttendanceType, User};
use chrono::{Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::config_file::{CliConfig, ResolvedSettings, ID_STRATEGY_ENV, STORE_PATH_ENV};
use crate::error::CliError;

pub type App = AttendanceService<SqliteStore>;

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub user_id: String,
    pub name: String,
    pub status: AttendanceType,
    pub today: Vec<AttendanceRecord>,
}

#[derive(Debug, Serialize)]
pub struct UserListItem {
    pub id: String,
    pub name: String,
    pub username: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub department: Option<String>,
    pub position: Option<String>,
    pub join_date: Option<String>,
}

pub fn resolve_settings(cli_store_path: Option<PathBuf>) -> Result<ResolvedSettings, CliError> {
    let config = CliConfig::load().map_err(CliError::Config)?;
    config
        .resolve(
            cli_store_path,
            std::env::var(STORE_PATH_ENV).ok(),
            std::env::var(ID_STRATEGY_ENV).ok(),
        )
        .map_err(CliError::Config)
}

pub fn open_app(settings: &ResolvedSettings) -> Result<App, CliError> {
    let store = SqliteStore::open(&settings.store_path)?;
    Ok(AttendanceService::with_defaults(
        store,
        settings.id_strategy,
        settings.keys.clone(),
    ))
}

/// Open the store and run the startup reconciliation every invocation gets.
pub fn start_app(settings: &ResolvedSettings) -> Result<(App, StartupReport), CliError> {
    let app = open_app(settings)?;
    let report = app.start()?;
    Ok((app, report))
}

pub fn require_user(report: &StartupReport) -> Result<User, CliError> {
    report.current_user.clone().ok_or(CliError::NotLoggedIn)
}

/// Check a `--join-date` argument and return it in canonical `YYYY-MM-DD` form
pub fn parse_join_date(raw: Option<String>) -> Result<Option<String>, CliError> {
    raw.map(|value| {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(|date| date.format("%Y-%m-%d").to_string())
            .map_err(|_| CliError::InvalidDate(value.clone()))
    })
    .transpose()
}

/// Render a stored timestamp in `tz`, falling back to the raw text.
pub fn format_timestamp<Tz>(timestamp: &Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.parse().map_or_else(
        || timestamp.as_str().to_string(),
        |at| at.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

pub fn format_record_line<Tz>(record: &AttendanceRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let location = record
        .location
        .as_deref()
        .map(|location| format!(" @ {location}"))
        .unwrap_or_default();
    format!(
        "{} | {} | {:<10} | {}{}",
        format_timestamp(&record.timestamp, tz),
        record.id,
        record.kind.label(),
        record.user_id,
        location
    )
}

pub fn format_record_lines(records: &[AttendanceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| format_record_line(record, &Local))
        .collect()
}

pub fn user_to_list_item(user: &User) -> UserListItem {
    UserListItem {
        id: user.id.clone(),
        name: user.name.clone(),
        username: user.username.clone(),
        is_admin: user.is_admin,
        is_active: user.is_active,
        department: user.department.clone(),
        position: user.position.clone(),
        join_date: user.join_date.clone(),
    }
}

pub fn format_user_line(user: &User) -> String {
    let mut flags = Vec::new();
    if user.is_admin {
        flags.push("admin");
    }
    if !user.is_active {
        flags.push("inactive");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };

    format!(
        "{} | {} | {} / {}{}",
        user.id,
        user.name,
        user.department.as_deref().unwrap_or("-"),
        user.position.as_deref().unwrap_or("-"),
        flags
    )
}
