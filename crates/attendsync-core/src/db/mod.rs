//! Durable storage for attendsync

mod connection;
mod migrations;

pub use connection::SqliteStore;
