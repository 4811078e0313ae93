//! World-state schema for SQLite.
//!
//! The schema version lives in the database header (`PRAGMA user_version`),
//! so the file carries no bookkeeping table next to `world_state`. Each entry
//! in [`WORLD_STATE_SCHEMA`] moves the schema from the previous version to its
//! own, and all pending steps run in one SQLite transaction.

use rusqlite::Connection;

use crate::error::{LedgerError, Result};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Schema steps, in version order.
const WORLD_STATE_SCHEMA: &[(u32, &str)] = &[(
    1,
    r#"
    -- Keys are BLOBs so composite keys with U+0000 delimiters compare bytewise
    CREATE TABLE world_state (
        key BLOB PRIMARY KEY,
        value BLOB NOT NULL,
        version INTEGER NOT NULL,          -- bumped on every write
        updated_at INTEGER NOT NULL        -- local timestamp (Unix ms)
    );
    "#,
)];

/// Read the schema version stored in the database header.
pub fn schema_version(conn: &Connection) -> Result<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Bring the world-state schema up to [`CURRENT_VERSION`].
///
/// Opening an up-to-date database is a no-op. A database written by a newer
/// build is refused rather than guessed at.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let found = schema_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(LedgerError::Migration(format!(
            "world state schema version {} is newer than supported version {}",
            found, CURRENT_VERSION
        )));
    }
    if found == CURRENT_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in WORLD_STATE_SCHEMA.iter().filter(|(v, _)| *v > found) {
        tracing::debug!(from = found, to = *version, "upgrading world state schema");
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", *version)?;
    }
    tx.commit()?;

    Ok(())
}

/// Get current time in milliseconds.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_fresh_database_gets_world_state() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);

        migrate(&mut conn).unwrap();

        assert_eq!(tables(&conn), vec!["world_state".to_string()]);
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_newer_schema_refused() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_VERSION + 1)
            .unwrap();

        let result = migrate(&mut conn);
        assert!(matches!(result, Err(LedgerError::Migration(_))));
        assert!(tables(&conn).is_empty());
    }
}
