pub mod common;
pub mod completions;
pub mod config;
pub mod export;
pub mod record;
pub mod session;
pub mod status;
pub mod sync;
pub mod users;
