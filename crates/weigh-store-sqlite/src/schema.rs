//! SQL schema for the weigh SQLite store.
//!
//! Executed every time a store is opened. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Connection-level settings; applied before the schema.
pub const PRAGMAS: &str = "
PRAGMA foreign_keys = ON;
";

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    person TEXT PRIMARY KEY,
    height REAL
);

-- Weight observations are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS weights (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    person         TEXT,
    date           TEXT,   -- ISO 8601 calendar date, YYYY-MM-DD
    current_weight REAL,
    target_weight  REAL,   -- frozen at insert time
    FOREIGN KEY(person) REFERENCES users(person)
);

CREATE INDEX IF NOT EXISTS weights_person_date_idx ON weights(person, date);

PRAGMA user_version = 1;
";
