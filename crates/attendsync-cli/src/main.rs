//! attendsync CLI - finger in/out attendance from the terminal
//!
//! Every invocation reconciles the local list with the shared sync slot
//! before doing its own work.

mod cli;
mod commands;
mod config_file;
mod error;


use attendsync_core::models::UserUpdate;
use attendsync_core::AttendanceType;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConfigCommands, SyncCommands, UserCommands};
use crate::commands::common::{parse_join_date, resolve_settings};
use crate::commands::completions::run_completions;
use crate::commands::config::{run_config_set, run_config_show, ConfigChanges};
use crate::commands::export::run_export;
use crate::commands::record::run_record;
use crate::commands::session::{run_init, run_login, run_logout};
use crate::commands::status::{run_history, run_status};
use crate::commands::sync::{run_sync_pull, run_sync_push, run_sync_reconcile};
use crate::commands::users::{
    run_users_add, run_users_deactivate, run_users_list, run_users_update, NewUser,
};
use crate::config_file::ResolvedSettings;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("attendsync=info,attendsync_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    // Completions and config edits never touch the store.
    match cli.command {
        Commands::Completions { shell, output } => {
            return run_completions(shell, output.as_deref());
        }
        Commands::Config {
            command:
                ConfigCommands::Set {
                    store_path,
                    id_strategy,
                    sync_key,
                    attendance_key,
                },
        } => {
            return run_config_set(ConfigChanges {
                store_path,
                id_strategy,
                sync_key,
                attendance_key,
            });
        }
        command => {
            let settings = resolve_settings(cli.store)?;
            match command {
                Commands::Init => run_init(&settings)?,
                Commands::Login { username, password } => {
                    run_login(&settings, &username, &password)?;
                }
                Commands::Logout => run_logout(&settings)?,
                Commands::In { location } => {
                    run_record(&settings, AttendanceType::In, &location)?;
                }
                Commands::Out { location } => {
                    run_record(&settings, AttendanceType::Out, &location)?;
                }
                Commands::Status { json } => run_status(&settings, json)?,
                Commands::History { user, limit, json } => {
                    run_history(&settings, user.as_deref(), limit, json)?;
                }
                Commands::Sync { command } => match command {
                    SyncCommands::Push => run_sync_push(&settings)?,
                    SyncCommands::Pull { json } => run_sync_pull(&settings, json)?,
                    SyncCommands::Reconcile => run_sync_reconcile(&settings)?,
                },
                Commands::Users { command } => run_users(&settings, command)?,
                Commands::Export { format, output } => {
                    run_export(&settings, format, output.as_deref())?;
                }
                Commands::Config {
                    command: ConfigCommands::Show,
                } => run_config_show(&settings)?,
                Commands::Completions { .. } | Commands::Config { .. } => {}
            }
        }
    }

    Ok(())
}

fn run_users(
    settings: &ResolvedSettings,
    command: UserCommands,
) -> Result<(), CliError> {
    match command {
        UserCommands::List { all, json } => run_users_list(settings, all, json),
        UserCommands::Add {
            id,
            name,
            username,
            password,
            department,
            position,
            join_date,
            admin,
        } => run_users_add(
            settings,
            NewUser {
                id,
                name,
                username,
                password,
                department,
                position,
                join_date,
                admin,
            },
        ),
        UserCommands::Update {
            id,
            name,
            username,
            password,
            department,
            position,
            join_date,
            activate,
        } => {
            let update = UserUpdate {
                name,
                username,
                password,
                department,
                position,
                join_date: parse_join_date(join_date)?,
                is_active: activate.then_some(true),
                ..UserUpdate::default()
            };
            run_users_update(settings, &id, update)
        }
        UserCommands::Deactivate { id } => run_users_deactivate(settings, &id),
    }
}
