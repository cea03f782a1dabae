//! SQL schema for the weather store.
//!
//! Executed once at connection startup. There is a single table and no
//! migration path; `CREATE TABLE IF NOT EXISTS` makes it idempotent.

/// The only table; live queries watch it by this name.
pub const TABLE: &str = "weather_conditions";

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS weather_conditions (
    id          INTEGER PRIMARY KEY,
    condition   TEXT    NOT NULL,
    temperature INTEGER NOT NULL,
    emoji       TEXT    NOT NULL,
    mood        TEXT    NOT NULL
);
";
