use std::path::{Path, PathBuf};

use attendsync_core::clock::Clock;
use attendsync_core::export::{
    render_attendance_export, suggested_export_file_name, ExportFormat as CoreExportFormat,
};

use crate::cli::ExportFormat;
use crate::commands::common::start_app;
use crate::config_file::ResolvedSettings;
use crate::error::CliError;

pub fn run_export(
    settings: &ResolvedSettings,
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<(), CliError> {
    let (app, _) = start_app(settings)?;
    let records = app.session().records()?;
    let users = app.users().all()?;
    let format = to_core_format(format);
    let rendered = render_attendance_export(&records, &users, format)?;

    if let Some(path) = output_path {
        let path = resolve_export_path(path, format, app.clock().now_millis());
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// A directory target gets a timestamped file name; anything else is used as is.
pub fn resolve_export_path(path: &Path, format: CoreExportFormat, timestamp_ms: i64) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(format, timestamp_ms))
    } else {
        path.to_path_buf()
    }
}

pub const fn to_core_format(format: ExportFormat) -> CoreExportFormat {
    match format {
        ExportFormat::Json => CoreExportFormat::Json,
        ExportFormat::Markdown => CoreExportFormat::Markdown,
    }
}
