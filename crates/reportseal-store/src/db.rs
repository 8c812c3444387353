//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

#![allow(clippy::result_large_err)]

use crate::config::LedgerConfig;
use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open and configure the ledger database described by `config`
pub fn open_configured(config: &LedgerConfig) -> Result<Connection> {
    let conn = open(&config.path)?;
    configure(&conn, config)?;
    Ok(conn)
}

/// Configure a connection for ledger use
///
/// Sets the busy timeout and switches to WAL journaling.
pub fn configure(conn: &Connection, config: &LedgerConfig) -> Result<()> {
    conn.busy_timeout(config.busy_timeout())
        .map_err(from_rusqlite)?;

    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(from_rusqlite)?;
    tracing::debug!(journal_mode = %mode, "Configured ledger connection");

    Ok(())
}
