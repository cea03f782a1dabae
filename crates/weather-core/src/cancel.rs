//! Cooperative cancellation for read operations.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::Cancelled;

/// Run `fut` until it completes or `token` is cancelled, whichever is first.
///
/// On cancellation `fut` is dropped without being polled again and the call
/// resolves to [`Cancelled`] converted into the caller's error type. A token
/// that is already cancelled wins over a ready future.
pub async fn cancellable<T, E, F>(token: &CancellationToken, fut: F) -> Result<T, E>
where
  F: Future<Output = Result<T, E>>,
  E: From<Cancelled>,
{
  tokio::select! {
    biased;
    () = token.cancelled() => Err(Cancelled.into()),
    result = fut => result,
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  #[derive(Debug, PartialEq)]
  enum TestError {
    Cancelled,
  }

  impl From<Cancelled> for TestError {
    fn from(_: Cancelled) -> Self { TestError::Cancelled }
  }

  #[tokio::test]
  async fn completes_when_not_cancelled() {
    let token = CancellationToken::new();
    let result: Result<u32, TestError> =
      cancellable(&token, async { Ok(7) }).await;
    assert_eq!(result, Ok(7));
  }

  #[tokio::test]
  async fn already_cancelled_token_wins() {
    let token = CancellationToken::new();
    token.cancel();
    let result: Result<u32, TestError> =
      cancellable(&token, async { Ok(7) }).await;
    assert_eq!(result, Err(TestError::Cancelled));
  }

  #[tokio::test]
  async fn cancel_during_pending_read() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(10)).await;
      trigger.cancel();
    });

    let result: Result<u32, TestError> = cancellable(&token, async {
      std::future::pending::<()>().await;
      Ok(7)
    })
    .await;
    assert_eq!(result, Err(TestError::Cancelled));
  }
}
