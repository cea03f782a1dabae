//! [`LiveQuery`] — a push sequence of query results with explicit
//! subscribe/cancel semantics.
//!
//! A producer task owns the sending half of a bounded channel and pushes a
//! fresh result whenever the underlying data changes. The subscriber holds the
//! `LiveQuery`; dropping it (or calling [`LiveQuery::cancel`]) aborts the
//! producer, which releases whatever the producer was holding.

use std::future::Future;

use tokio::{sync::mpsc, task::JoinHandle};

/// A standing observation that yields `Result<T, E>` items until cancelled.
///
/// The sequence never completes on its own while the producer is healthy. A
/// producer that hits an error sends it as the final item and stops, after
/// which [`LiveQuery::next`] returns `None`.
pub struct LiveQuery<T, E> {
  rx:   mpsc::Receiver<Result<T, E>>,
  task: JoinHandle<()>,
}

impl<T, E> LiveQuery<T, E>
where
  T: Send + 'static,
  E: Send + 'static,
{
  /// Spawn `producer` on the current tokio runtime with a channel holding up
  /// to `buffer` undelivered results (at least one).
  pub fn spawn<F, Fut>(buffer: usize, producer: F) -> Self
  where
    F: FnOnce(mpsc::Sender<Result<T, E>>) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
  {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    let task = tokio::spawn(producer(tx));
    Self { rx, task }
  }
}

impl<T, E> LiveQuery<T, E> {
  /// Wait for the next emitted result. `None` once the producer has stopped.
  pub async fn next(&mut self) -> Option<Result<T, E>> { self.rx.recv().await }

  /// Take an already-delivered result without waiting.
  pub fn try_next(&mut self) -> Option<Result<T, E>> { self.rx.try_recv().ok() }

  /// Stop observing. Equivalent to dropping the handle.
  pub fn cancel(self) {}

  /// Whether the producer task has exited.
  pub fn is_finished(&self) -> bool { self.task.is_finished() }
}

impl<T, E> Drop for LiveQuery<T, E> {
  fn drop(&mut self) { self.task.abort(); }
}

#[cfg(test)]
mod tests {
  use tokio::sync::oneshot;

  use super::*;

  struct DropSignal(Option<oneshot::Sender<()>>);

  impl Drop for DropSignal {
    fn drop(&mut self) {
      if let Some(tx) = self.0.take() {
        let _ = tx.send(());
      }
    }
  }

  #[tokio::test]
  async fn delivers_items_in_order() {
    let mut live: LiveQuery<u32, ()> = LiveQuery::spawn(4, |tx| async move {
      for n in 1..=3 {
        if tx.send(Ok(n)).await.is_err() {
          return;
        }
      }
      std::future::pending::<()>().await;
    });

    assert_eq!(live.next().await, Some(Ok(1)));
    assert_eq!(live.next().await, Some(Ok(2)));
    assert_eq!(live.next().await, Some(Ok(3)));
    assert!(!live.is_finished());
  }

  #[tokio::test]
  async fn error_ends_the_sequence() {
    let mut live: LiveQuery<u32, &'static str> =
      LiveQuery::spawn(4, |tx| async move {
        let _ = tx.send(Ok(1)).await;
        let _ = tx.send(Err("boom")).await;
      });

    assert_eq!(live.next().await, Some(Ok(1)));
    assert_eq!(live.next().await, Some(Err("boom")));
    assert_eq!(live.next().await, None);
  }

  #[tokio::test]
  async fn cancel_releases_producer_resources() {
    let (dropped_tx, dropped_rx) = oneshot::channel();

    let live: LiveQuery<u32, ()> = LiveQuery::spawn(1, |_tx| async move {
      let _held = DropSignal(Some(dropped_tx));
      std::future::pending::<()>().await;
    });
    live.cancel();

    // Whether or not the task was ever polled, aborting it drops the sender.
    let released =
      tokio::time::timeout(std::time::Duration::from_secs(1), dropped_rx).await;
    assert!(released.is_ok(), "producer state was not released");
  }

  #[tokio::test]
  async fn zero_buffer_is_clamped() {
    let mut live: LiveQuery<u32, ()> = LiveQuery::spawn(0, |tx| async move {
      let _ = tx.send(Ok(9)).await;
      std::future::pending::<()>().await;
    });
    assert_eq!(live.next().await, Some(Ok(9)));
  }
}
