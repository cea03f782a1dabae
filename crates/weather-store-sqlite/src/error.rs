//! Error type for `weather-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Engine-level failure: I/O, corruption, constraint violation, or a
  /// closed connection. Never retried by this crate.
  #[error("storage error: {0}")]
  Storage(#[from] tokio_rusqlite::Error),

  #[error(transparent)]
  Cancelled(#[from] weather_core::Cancelled),
}

impl Error {
  /// `true` when the caller withdrew interest; such errors are not faults.
  pub fn is_cancelled(&self) -> bool { matches!(self, Error::Cancelled(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
