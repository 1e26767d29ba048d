//! SQL schema for the Somnus SQLite store.
//!
//! There is a single table and no migrations; the DDL is applied on every
//! start.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Samples are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- AUTOINCREMENT keeps ids from ever being reused.
-- The table name is shared with earlier sleep_data.db files, which may have
-- nullable timestamp/data_type/payload columns; their rows are read as-is.
CREATE TABLE IF NOT EXISTS sleep_sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id  TEXT    NOT NULL,
    timestamp   INTEGER NOT NULL,   -- client-supplied
    data_type   TEXT    NOT NULL,   -- 'audio' | 'motion' | free-form
    payload     TEXT    NOT NULL    -- the full sample as JSON
);

CREATE INDEX IF NOT EXISTS sleep_sessions_session_type_idx
    ON sleep_sessions(session_id, data_type);
";
