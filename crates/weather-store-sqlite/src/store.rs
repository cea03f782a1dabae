//! [`SqliteStore`] — the SQLite implementation of [`WeatherStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::{debug, warn};
use weather_core::{LiveQuery, WeatherCondition, WeatherStore};

use crate::{
  Result,
  encode::{
    BY_ID_SQL, COUNT_SQL, DELETE_ALL_SQL, LIST_SQL, RANDOM_SQL, read_row,
    upsert_all,
  },
  notify::InvalidationTracker,
  schema::{SCHEMA, TABLE},
};

// ─── Options ─────────────────────────────────────────────────────────────────

/// Tunables for an open store.
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
  /// Undelivered listings a live query may buffer before its producer waits
  /// for the subscriber.
  pub live_buffer: usize,
}

impl Default for StoreOptions {
  fn default() -> Self { Self { live_buffer: 16 } }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A weather catalog backed by a single SQLite handle.
///
/// Cloning is cheap — clones share the connection and the live-query
/// registry. Every statement runs on the connection's own thread, so write
/// transactions are serialized and readers only ever see committed state.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  tracker:         InvalidationTracker,
  options:         StoreOptions,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with(path, StoreOptions::default()).await
  }

  /// [`open`](Self::open) with explicit options.
  pub async fn open_with(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn, options).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn, StoreOptions::default()).await
  }

  async fn init(conn: tokio_rusqlite::Connection, options: StoreOptions) -> Result<Self> {
    let tracker = InvalidationTracker::new();
    let hooks = tracker.clone();

    conn
      .call(move |conn| {
        conn.execute_batch(SCHEMA)?;
        hooks.install(conn);
        Ok(())
      })
      .await?;

    debug!(live_buffer = options.live_buffer, "weather store opened");
    Ok(Self { conn, tracker, options })
  }

  /// The live-query registry for this store.
  pub fn tracker(&self) -> &InvalidationTracker { &self.tracker }

  /// Close the underlying connection. Other clones fail afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }
}

async fn list_all(conn: &tokio_rusqlite::Connection) -> Result<Vec<WeatherCondition>> {
  let rows = conn
    .call(|conn| {
      let mut stmt = conn.prepare_cached(LIST_SQL)?;
      let rows = stmt
        .query_map([], read_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      Ok(rows)
    })
    .await?;
  Ok(rows)
}

// ─── WeatherStore impl ───────────────────────────────────────────────────────

impl WeatherStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_all(&self, rows: Vec<WeatherCondition>) -> Result<()> {
    if rows.is_empty() {
      return Ok(());
    }
    let count = rows.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        upsert_all(&tx, &rows)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    debug!(rows = count, "weather conditions upserted");
    Ok(())
  }

  async fn delete_all(&self) -> Result<()> {
    let removed = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let removed = tx.execute(DELETE_ALL_SQL, [])?;
        tx.commit()?;
        Ok(removed)
      })
      .await?;

    debug!(rows = removed, "weather conditions deleted");
    Ok(())
  }

  async fn ensure_populated(&self, seed: Vec<WeatherCondition>) -> Result<bool> {
    let seeded = self
      .conn
      .call(move |conn| {
        // IMMEDIATE takes the write lock before the emptiness check.
        let tx = conn.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        let existing: i64 = tx.query_row(COUNT_SQL, [], |r| r.get(0))?;
        if existing > 0 || seed.is_empty() {
          return Ok(false);
        }
        upsert_all(&tx, &seed)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    debug!(seeded, "weather catalog population checked");
    Ok(seeded)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_random_weather(&self) -> Result<Option<WeatherCondition>> {
    let row = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .prepare_cached(RANDOM_SQL)?
            .query_row([], read_row)
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn get_weather_by_id(&self, id: i64) -> Result<Option<WeatherCondition>> {
    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .prepare_cached(BY_ID_SQL)?
            .query_row([id], read_row)
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn list_weather(&self) -> Result<Vec<WeatherCondition>> {
    list_all(&self.conn).await
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row(COUNT_SQL, [], |r| r.get(0))?))
      .await?;
    Ok(n as u64)
  }

  // ── Live ──────────────────────────────────────────────────────────────────

  fn get_all_weather(&self) -> LiveQuery<Vec<WeatherCondition>, crate::Error> {
    let conn = self.conn.clone();
    // Registered before the first listing so no commit in between is missed.
    let observer = self.tracker.register(TABLE);

    LiveQuery::spawn(self.options.live_buffer, move |tx| async move {
      loop {
        let listing = list_all(&conn).await;
        let failed = listing.is_err();
        if let Err(e) = &listing {
          warn!(error = %e, "live weather listing failed; ending subscription");
        }
        if tx.send(listing).await.is_err() || failed {
          break;
        }
        observer.changed().await;
      }
    })
  }
}
