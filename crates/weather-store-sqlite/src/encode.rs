//! Row mapping between [`WeatherCondition`] and the `weather_conditions`
//! columns. Columns are bound by name so statement column order is free to
//! change.

use rusqlite::{Row, Transaction, params};
use weather_core::WeatherCondition;

// ─── Statements ──────────────────────────────────────────────────────────────

pub const LIST_SQL: &str = "
SELECT id, condition, temperature, emoji, mood
FROM weather_conditions
ORDER BY id ASC";

pub const BY_ID_SQL: &str = "
SELECT id, condition, temperature, emoji, mood
FROM weather_conditions
WHERE id = ?1
LIMIT 1";

pub const RANDOM_SQL: &str = "
SELECT id, condition, temperature, emoji, mood
FROM weather_conditions
ORDER BY RANDOM()
LIMIT 1";

pub const COUNT_SQL: &str = "SELECT COUNT(*) FROM weather_conditions";

// The WHERE clause keeps SQLite off its truncate path, which bypasses the
// update hook and would hide the delete from live queries.
pub const DELETE_ALL_SQL: &str = "DELETE FROM weather_conditions WHERE true";

const UPSERT_SQL: &str = "
INSERT OR REPLACE INTO weather_conditions (id, condition, temperature, emoji, mood)
VALUES (?1, ?2, ?3, ?4, ?5)";

// ─── Mapping ─────────────────────────────────────────────────────────────────

pub fn read_row(row: &Row<'_>) -> rusqlite::Result<WeatherCondition> {
  Ok(WeatherCondition {
    id:          row.get("id")?,
    condition:   row.get("condition")?,
    temperature: row.get("temperature")?,
    emoji:       row.get("emoji")?,
    mood:        row.get("mood")?,
  })
}

/// Upsert `rows` inside `tx`. The caller decides whether to commit.
pub fn upsert_all(tx: &Transaction<'_>, rows: &[WeatherCondition]) -> rusqlite::Result<()> {
  let mut stmt = tx.prepare_cached(UPSERT_SQL)?;
  for row in rows {
    stmt.execute(params![
      row.id,
      row.condition,
      row.temperature,
      row.emoji,
      row.mood,
    ])?;
  }
  Ok(())
}
