//! Error types for `weather-core`.

use thiserror::Error;

/// The caller withdrew interest in a read before it completed.
///
/// Not a fault: backends wrap it in their own error type so callers can tell
/// it apart from storage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation cancelled")]
pub struct Cancelled;
