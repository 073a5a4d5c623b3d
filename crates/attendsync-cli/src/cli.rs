use std::path::PathBuf;

use attendsync_core::models::DEFAULT_LOCATION;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "attendsync")]
#[command(about = "Record finger in/out attendance and reconcile it across devices")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the local store file
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed the sync slot and user table, then reconcile local records
    Init,
    /// Sign in with username and password
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and push local records to the sync slot
    Logout,
    /// Record a finger in for the signed-in user
    In {
        /// Where the event happened
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,
    },
    /// Record a finger out for the signed-in user
    Out {
        /// Where the event happened
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,
    },
    /// Show today's records and current status for the signed-in user
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List recent records, newest first
    History {
        /// Only records of this user id
        #[arg(long, value_name = "ID")]
        user: Option<String>,
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read or write the shared sync slot
    Sync {
        #[command(subcommand)]
        command: SyncCommands,
    },
    /// Manage the user table
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Export local attendance records
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file, or a directory to write a timestamped file into
        /// (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum SyncCommands {
    /// Overwrite the sync slot with local records and users
    Push,
    /// Show the current sync slot contents
    Pull {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Merge the sync slot's records into the local list
    Reconcile,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List {
        /// Include administrators and deactivated users
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a user
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Defaults to the id
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        position: Option<String>,
        /// Join date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        join_date: Option<String>,
        #[arg(long)]
        admin: bool,
    },
    /// Change fields of an existing user
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        position: Option<String>,
        /// Join date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        join_date: Option<String>,
        /// Reactivate a deactivated user
        #[arg(long)]
        activate: bool,
    },
    /// Deactivate a user (they stay in the table but cannot sign in)
    Deactivate { id: String },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Update the configuration file
    Set {
        /// Default local store path
        #[arg(long, value_name = "PATH")]
        store_path: Option<PathBuf>,
        /// Record id strategy (timestamp or uuid)
        #[arg(long, value_name = "STRATEGY")]
        id_strategy: Option<String>,
        /// Key of the shared sync slot
        #[arg(long, value_name = "KEY")]
        sync_key: Option<String>,
        /// Key of the local attendance list
        #[arg(long, value_name = "KEY")]
        attendance_key: Option<String>,
    },
}
