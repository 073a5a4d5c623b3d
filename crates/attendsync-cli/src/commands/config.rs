use std::path::PathBuf;

use crate::config_file::{default_config_path, CliConfig, ResolvedSettings};
use crate::error::CliError;

pub struct ConfigChanges {
    pub store_path: Option<PathBuf>,
    pub id_strategy: Option<String>,
    pub sync_key: Option<String>,
    pub attendance_key: Option<String>,
}

pub fn run_config_show(settings: &ResolvedSettings) -> Result<(), CliError> {
    println!("Config file: {}", default_config_path().display());
    println!("Store path: {}", settings.store_path.display());
    println!("Id strategy: {}", settings.id_strategy);
    println!("Sync key: {}", settings.keys.sync);
    println!("Attendance key: {}", settings.keys.attendance);
    println!("Users key: {}", settings.keys.users);
    println!("Current user key: {}", settings.keys.current_user);
    Ok(())
}

pub fn run_config_set(changes: ConfigChanges) -> Result<(), CliError> {
    let mut config = CliConfig::load().map_err(CliError::Config)?;
    apply_config_changes(&mut config, changes)?;
    let path = config.save().map_err(CliError::Config)?;
    println!("Saved {}", path.display());
    Ok(())
}

pub fn apply_config_changes(
    config: &mut CliConfig,
    changes: ConfigChanges,
) -> Result<(), CliError> {
    if let Some(store_path) = changes.store_path {
        config.store_path = Some(store_path);
    }
    if let Some(raw) = changes.id_strategy {
        config.id_strategy = raw
            .parse()
            .map_err(|error: attendsync_core::Error| CliError::Config(error.to_string()))?;
    }
    if let Some(sync_key) = changes.sync_key {
        config.keys.sync = sync_key;
    }
    if let Some(attendance_key) = changes.attendance_key {
        config.keys.attendance = attendance_key;
    }
    config.keys = std::mem::take(&mut config.keys).normalized();
    config
        .keys
        .validate()
        .map_err(|error| CliError::Config(error.to_string()))
}
