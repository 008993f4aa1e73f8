//! SQLite connection bootstrap.
//!
//! Returned connections have all migrations applied; nothing reads or writes
//! contacts before that.

pub mod migrations;

use crate::error::DbResult;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

/// Opens a SQLite database file (or `:memory:`) and applies pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    if path == Path::new(":memory:") {
        return open_db_in_memory();
    }

    let started_at = Instant::now();
    let mut conn = Connection::open(path)?;
    bootstrap(&mut conn, started_at, "file")?;
    Ok(conn)
}

/// Opens an in-memory SQLite database and applies all migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    let mut conn = Connection::open_in_memory()?;
    bootstrap(&mut conn, started_at, "memory")?;
    Ok(conn)
}

/// Name of the SQL function that lowercases text with full Unicode case folding.
///
/// SQLite's built-in `LOWER()` folds ASCII only.
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Registers the application's scalar SQL functions on `conn`.
pub fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )?;
    Ok(())
}

fn bootstrap(conn: &mut Connection, started_at: Instant, mode: &str) -> DbResult<()> {
    register_functions(conn)?;

    match migrations::apply_migrations(conn) {
        Ok(()) => {
            info!(
                mode = mode,
                duration_ms = started_at.elapsed().as_millis() as u64,
                "Database opened"
            );
            Ok(())
        }
        Err(err) => {
            error!(mode = mode, error = %err, "Database bootstrap failed");
            Err(err)
        }
    }
}
