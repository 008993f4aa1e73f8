//! Database schema migrations for the contact store.
//!
//! This module owns the ordered list of schema scripts and brings a
//! connection up to the newest one. The schema version lives in SQLite's
//! `user_version` pragma, so no bookkeeping table is needed.

use crate::error::{DbError, DbResult};
use rusqlite::{Connection, Transaction};
use tracing::{debug, info};

/// A numbered schema script.
struct SchemaStep {
    /// Value written to `user_version` once the script has run
    version: u32,

    /// SQL batch to execute
    script: &'static str,
}

/// All schema steps, oldest first.
static SCHEMA_STEPS: [SchemaStep; 1] = [SchemaStep {
    version: 1,
    script: include_str!("0001_contacts.sql"),
}];

/// Schema version this build expects to find after migrating.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.iter().map(|step| step.version).max().unwrap_or(0)
}

/// Bring `conn` up to [`latest_version`].
///
/// Pending steps run in one transaction; a failing step leaves the schema
/// untouched. A database written by a newer build is refused.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = current_user_version(conn)?;
    let target = latest_version();

    if found > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: target,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect();

    if pending.is_empty() {
        debug!(version = found, "Schema already current");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        run_step(&tx, step)?;
    }
    tx.commit()?;

    info!(from = found, to = target, "Schema migrated");
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> DbResult<()> {
    tx.execute_batch(step.script)?;
    tx.pragma_update(None, "user_version", step.version)?;
    debug!(version = step.version, "Schema step applied");
    Ok(())
}

pub(crate) fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
