//! Table creation, additive migrations and the chat snapshot backfill.

use std::collections::HashSet;

use rusqlite::Connection;
use tracing::info;

use crate::store::error::{Result, StoreError};

const CREATE_PROMPTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS prompts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    prompt_text TEXT NOT NULL,
    separator TEXT NOT NULL DEFAULT '---',
    model TEXT NOT NULL
)";

const CREATE_CHATS_TABLE: &str = "CREATE TABLE IF NOT EXISTS chats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    prompt_id INTEGER,
    user_input TEXT NOT NULL,
    model_output TEXT,
    request_timestamp DATETIME NOT NULL,
    response_timestamp DATETIME,
    time_taken_ms INTEGER,
    input_token_count INTEGER,
    output_token_count INTEGER,
    error_message TEXT,
    FOREIGN KEY(prompt_id) REFERENCES prompts(id)
)";

/// Columns added to `chats` after the first release, in order
const CHAT_COLUMN_MIGRATIONS: &[(&str, &str)] = &[("prompt_name", "TEXT"), ("model_used", "TEXT")];

const BACKFILL_CHAT_SNAPSHOTS: &str = "UPDATE chats
SET
    prompt_name = (SELECT name FROM prompts WHERE prompts.id = chats.prompt_id),
    model_used = (SELECT model FROM prompts WHERE prompts.id = chats.prompt_id)
WHERE prompt_name IS NULL AND prompt_id IS NOT NULL";

/// Create tables, apply migrations, and backfill historical rows
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_PROMPTS_TABLE, [])?;
    conn.execute(CREATE_CHATS_TABLE, [])?;
    migrate(conn)?;
    backfill_chat_snapshots(conn)?;
    Ok(())
}

/// Names of the columns currently present on `table`
fn table_columns(conn: &Connection, table: &str) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<HashSet<_>>>()?;
    Ok(columns)
}

/// Add any missing `chats` columns. Returns the names of the columns added.
pub fn migrate(conn: &Connection) -> Result<Vec<&'static str>> {
    info!("Checking database schema");
    let existing = table_columns(conn, "chats")?;

    let mut added = Vec::new();
    for (column, column_type) in CHAT_COLUMN_MIGRATIONS {
        if existing.contains(*column) {
            continue;
        }
        info!(column, "Schema migration: adding column to chats");
        conn.execute(
            &format!("ALTER TABLE chats ADD COLUMN {} {}", column, column_type),
            [],
        )
        .map_err(|e| StoreError::Migration(format!("failed to add '{}' column: {}", column, e)))?;
        added.push(*column);
    }

    info!("Database schema is up to date");
    Ok(added)
}

/// Fill `prompt_name`/`model_used` on chats that reference a prompt but
/// predate the snapshot columns. Returns the number of rows updated.
pub fn backfill_chat_snapshots(conn: &Connection) -> Result<usize> {
    let updated = conn
        .execute(BACKFILL_CHAT_SNAPSHOTS, [])
        .map_err(|e| StoreError::Migration(format!("chat snapshot backfill failed: {}", e)))?;

    if updated > 0 {
        info!(rows = updated, "Backfilled historical chat records");
    } else {
        info!("No historical chat data needed backfilling");
    }
    Ok(updated)
}
