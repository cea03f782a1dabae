//! [`InvalidationTracker`] — re-runs live queries after commits.
//!
//! SQLite reports row writes through `update_hook` while a transaction is
//! open. The tracker buffers the written table names, drops them on rollback,
//! and on commit wakes every observer registered on one of those tables.
//!
//! Each observer owns a [`Notify`]. A wake-up with nobody waiting is stored as
//! a single permit, so a burst of commits collapses into one re-run that sees
//! the latest state.

use std::{
  collections::{BTreeSet, HashMap},
  sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
  },
};

use rusqlite::hooks::Action;
use tokio::sync::Notify;

type Observers = HashMap<String, HashMap<u64, Arc<Notify>>>;

/// Registry of live observers keyed by watched table.
///
/// Cloning is cheap; clones share one registry.
#[derive(Clone, Default)]
pub struct InvalidationTracker {
  inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
  next_id:   AtomicU64,
  observers: Mutex<Observers>,
}

impl Inner {
  fn observers(&self) -> MutexGuard<'_, Observers> {
    self.observers.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl InvalidationTracker {
  pub fn new() -> Self { Self::default() }

  /// Install commit tracking hooks on `conn`, replacing any existing ones.
  pub fn install(&self, conn: &rusqlite::Connection) {
    let pending: Arc<Mutex<BTreeSet<String>>> = Arc::default();

    let written = Arc::clone(&pending);
    conn.update_hook(Some(
      move |_action: Action, _db: &str, table: &str, _rowid: i64| {
        lock(&written).insert(table.to_owned());
      },
    ));

    let discarded = Arc::clone(&pending);
    conn.rollback_hook(Some(move || {
      lock(&discarded).clear();
    }));

    let tracker = self.clone();
    conn.commit_hook(Some(move || {
      let tables = std::mem::take(&mut *lock(&pending));
      if !tables.is_empty() {
        tracker.notify_tables(&tables);
      }
      // `false` lets the commit proceed.
      false
    }));
  }

  /// Register interest in `table`. The observer stays registered until it
  /// is dropped.
  pub fn register(&self, table: &str) -> Observer {
    let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
    let notify = Arc::new(Notify::new());
    self
      .inner
      .observers()
      .entry(table.to_owned())
      .or_default()
      .insert(id, Arc::clone(&notify));
    tracing::debug!(table, observer = id, "live observer registered");

    Observer {
      id,
      table: table.to_owned(),
      notify,
      inner: Arc::clone(&self.inner),
    }
  }

  /// Wake every observer of any table in `tables`.
  pub fn notify_tables<S: AsRef<str>>(&self, tables: impl IntoIterator<Item = S>) {
    let observers = self.inner.observers();
    for table in tables {
      let table = table.as_ref();
      let Some(watchers) = observers.get(table) else {
        continue;
      };
      tracing::trace!(table, observers = watchers.len(), "commit invalidated table");
      for notify in watchers.values() {
        notify.notify_one();
      }
    }
  }

  /// Number of observers currently registered on `table`.
  pub fn observer_count(&self, table: &str) -> usize {
    self.inner.observers().get(table).map_or(0, HashMap::len)
  }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
  m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ─── Observer ────────────────────────────────────────────────────────────────

/// A registration handle. Dropping it deregisters the observer.
pub struct Observer {
  id:     u64,
  table:  String,
  notify: Arc<Notify>,
  inner:  Arc<Inner>,
}

impl Observer {
  /// Resolve once a commit has written the watched table since the last call
  /// (or since registration, for the first call).
  pub async fn changed(&self) { self.notify.notified().await }
}

impl Drop for Observer {
  fn drop(&mut self) {
    let mut observers = self.inner.observers();
    if let Some(watchers) = observers.get_mut(&self.table) {
      watchers.remove(&self.id);
      if watchers.is_empty() {
        observers.remove(&self.table);
      }
    }
    tracing::debug!(table = %self.table, observer = self.id, "live observer released");
  }
}
