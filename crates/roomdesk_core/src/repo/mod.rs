//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for reservations and
//!   room settings.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Reservation writes must call `Reservation::validate()` before SQL.
//! - Duplicate cells are rejected by the storage constraint and surface as
//!   `RepoError::Conflict`, never as a raw SQLite error.

pub mod reservation_repo;
pub mod settings_repo;

use reservation_repo::{RepoError, RepoResult};
use rusqlite::Connection;

pub(crate) fn ensure_tables(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for &table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
