//! The `WeatherStore` trait.
//!
//! Implemented by storage backends (e.g. `weather-store-sqlite`). Callers
//! depend on this abstraction, not on a concrete backend.

use std::future::Future;

use crate::{condition::WeatherCondition, live::LiveQuery};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Data-access layer over the weather catalog.
///
/// Writes are transactional: a call either applies completely or not at all,
/// and once submitted it runs to commit or rollback even if the caller stops
/// waiting. Reads observe only committed state. "Not found" is `Ok(None)`.
pub trait WeatherStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Upsert every row in one transaction. A row whose `id` already exists is
  /// replaced in full. If any row fails, none are written.
  fn insert_all(
    &self,
    rows: Vec<WeatherCondition>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove every row in one transaction.
  fn delete_all(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert `seed` iff the table is empty. Returns `true` when it seeded.
  fn ensure_populated(
    &self,
    seed: Vec<WeatherCondition>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// One row chosen uniformly at random, or `None` when the table is empty.
  fn get_random_weather(
    &self,
  ) -> impl Future<Output = Result<Option<WeatherCondition>, Self::Error>> + Send + '_;

  /// Exact primary-key lookup.
  fn get_weather_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<WeatherCondition>, Self::Error>> + Send + '_;

  /// Every row, ascending by `id`, once.
  fn list_weather(
    &self,
  ) -> impl Future<Output = Result<Vec<WeatherCondition>, Self::Error>> + Send + '_;

  /// Number of stored rows.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Live ──────────────────────────────────────────────────────────────

  /// Standing observation of the full listing, ascending by `id`.
  ///
  /// Emits the current listing immediately, then a fresh listing after each
  /// commit that wrote the table. Bursts of commits may be coalesced, but the
  /// last emission always reflects a state at least as new as the last
  /// commit. Must be called from within a tokio runtime.
  fn get_all_weather(&self) -> LiveQuery<Vec<WeatherCondition>, Self::Error>;
}
