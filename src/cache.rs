//! Cache-aware query layer: deduplication, retry, gating, and observable
//! fetch state.
//!
//! A [`QueryCache`] holds one entry per [`QueryKey`] (operation name plus
//! the canonical JSON form of its parameters). Observing a key either
//! serves the cached value, joins an in-flight fetch, or starts a new one;
//! at most one request is ever outstanding per key. Each entry carries a
//! generation counter so a response that resolves after
//! [`invalidate`](QueryCache::invalidate) is discarded instead of being
//! applied to state nobody wants anymore. Entries with no live observers
//! are garbage-collected after an inactivity window (five minutes by
//! default).
//!
//! The cache is an explicitly constructed handle, cheap to clone and
//! shared by reference -- one per process, or one per test via
//! [`clear`](QueryCache::clear) for isolation.

use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// QueryKey
// ---------------------------------------------------------------------------

/// Identifier for a cache entry: operation name + parameter values.
///
/// Parameters are compared structurally -- two keys built from equal-valued
/// parameter objects are equal regardless of object identity. A missing
/// parameter object (`None`) canonicalizes to JSON `null`, which is
/// deliberately distinct from an empty object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    operation: &'static str,
    params: String,
}

impl QueryKey {
    pub fn new<P: Serialize>(operation: &'static str, params: Option<&P>) -> Result<Self> {
        let value = match params {
            Some(p) => serde_json::to_value(p)?,
            None => Value::Null,
        };
        // serde_json objects are ordered maps, so this form is canonical.
        Ok(Self {
            operation,
            params: value.to_string(),
        })
    }

    pub fn operation(&self) -> &str {
        self.operation
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.operation, self.params)
    }
}

// ---------------------------------------------------------------------------
// Observable state
// ---------------------------------------------------------------------------

/// Result lifecycle of a query, independent of whether a fetch is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Success,
    Error,
}

/// Whether a request is currently on the wire. `Idle` on a pending query
/// means the query is disabled (gated off), not failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Fetching,
}

/// Type-erased state stored in the cache and broadcast to observers.
#[derive(Debug, Clone)]
struct EntryState {
    data: Option<Arc<Value>>,
    error: Option<Arc<DashboardError>>,
    status: QueryStatus,
    fetch_status: FetchStatus,
}

impl EntryState {
    fn idle() -> Self {
        Self {
            data: None,
            error: None,
            status: QueryStatus::Pending,
            fetch_status: FetchStatus::Idle,
        }
    }
}

/// Typed snapshot of a query's observable state.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub error: Option<Arc<DashboardError>>,
    pub status: QueryStatus,
    pub fetch_status: FetchStatus,
}

impl<T> QueryState<T> {
    /// First load in progress: no result yet and a request on the wire.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending && self.fetch_status == FetchStatus::Fetching
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }
}

// ---------------------------------------------------------------------------
// QueryHandle
// ---------------------------------------------------------------------------

/// Observer handle for one cache entry.
///
/// Holding a handle keeps the entry alive (the GC only evicts entries with
/// no observers). Dropping it releases the entry for collection once the
/// inactivity window passes.
pub struct QueryHandle<T> {
    rx: watch::Receiver<EntryState>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> QueryHandle<T> {
    fn new(rx: watch::Receiver<EntryState>) -> Self {
        Self {
            rx,
            _marker: PhantomData,
        }
    }

    /// Current observable state, with the cached payload decoded into `T`.
    pub fn snapshot(&self) -> QueryState<T> {
        let state = self.rx.borrow().clone();
        match state.data.as_deref() {
            None => QueryState {
                data: None,
                error: state.error,
                status: state.status,
                fetch_status: state.fetch_status,
            },
            Some(value) => match serde_json::from_value::<T>(value.clone()) {
                Ok(data) => QueryState {
                    data: Some(data),
                    error: state.error,
                    status: state.status,
                    fetch_status: state.fetch_status,
                },
                // A payload the caller's type cannot represent is an error,
                // not silent absence.
                Err(e) => QueryState {
                    data: None,
                    error: Some(Arc::new(DashboardError::Json(e))),
                    status: QueryStatus::Error,
                    fetch_status: state.fetch_status,
                },
            },
        }
    }

    /// Wait for the next state change. Returns `false` once the entry is
    /// gone (cache cleared or the handle is disabled).
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Wait until the query settles (success or error, no fetch running)
    /// and return the final state. A disabled handle resolves immediately
    /// with its idle state.
    pub async fn ready(&mut self) -> QueryState<T> {
        loop {
            {
                let state = self.rx.borrow_and_update();
                if state.fetch_status == FetchStatus::Idle && state.status != QueryStatus::Pending
                {
                    break;
                }
            }
            if self.rx.changed().await.is_err() {
                break;
            }
        }
        self.snapshot()
    }
}

// ---------------------------------------------------------------------------
// QueryCache
// ---------------------------------------------------------------------------

struct Entry {
    tx: watch::Sender<EntryState>,
    generation: u64,
    in_flight: bool,
    last_used: Instant,
}

impl Entry {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(EntryState::idle());
        Self {
            tx,
            generation: 0,
            in_flight: false,
            last_used: Instant::now(),
        }
    }
}

/// Shared query cache. Clones are handles to the same entry map.
#[derive(Clone)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, Entry>>>,
    retry: u32,
    gc_time: Duration,
}

impl QueryCache {
    pub fn new(retry: u32, gc_time: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            retry,
            gc_time,
        }
    }

    /// Observe `key`, fetching with `fetch` if the entry holds no data.
    ///
    /// - cached data: served as-is, no request;
    /// - fetch in flight: the returned handle joins it;
    /// - empty or errored entry: a new fetch starts (re-observing an error
    ///   is the user-driven retry path).
    ///
    /// `fetch` may be invoked more than once: once per attempt under the
    /// retry policy.
    pub fn query<T, F, Fut>(&self, key: QueryKey, mut fetch: F) -> QueryHandle<T>
    where
        T: DeserializeOwned,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let mut entries = self.lock();
        Self::sweep_map(&mut entries, self.gc_time);

        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.last_used = Instant::now();
        let rx = entry.tx.subscribe();

        let needs_fetch = {
            let state = entry.tx.borrow();
            !entry.in_flight
                && (state.data.is_none() || state.status == QueryStatus::Error)
        };

        if needs_fetch {
            entry.in_flight = true;
            let generation = entry.generation;
            entry
                .tx
                .send_modify(|s| s.fetch_status = FetchStatus::Fetching);
            drop(entries);

            let cache = self.clone();
            let retry = self.retry;
            tokio::spawn(async move {
                let mut attempt = 0u32;
                let result = loop {
                    match fetch().await {
                        Ok(value) => break Ok(value),
                        Err(e) if attempt < retry => {
                            attempt += 1;
                            tracing::warn!(key = %key, attempt, error = %e, "query failed, retrying");
                        }
                        Err(e) => break Err(e),
                    }
                };
                cache.settle(&key, generation, result);
            });
        }

        QueryHandle::new(rx)
    }

    /// Handle for a gated-off query: fetch status `Idle`, no entry, no
    /// request, ever. Used when a query's precondition (e.g. a selected
    /// customer) is absent.
    pub fn disabled<T: DeserializeOwned>(&self) -> QueryHandle<T> {
        let (tx, rx) = watch::channel(EntryState::idle());
        drop(tx);
        QueryHandle::new(rx)
    }

    /// Drop `key`'s result and condemn any in-flight response for it.
    /// The next observation fetches fresh data.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.lock();
        if let Some(entry) = entries.get_mut(key) {
            entry.generation += 1;
            entry.in_flight = false;
            entry.tx.send_replace(EntryState::idle());
        }
    }

    /// Evict entries that have had no observers for the inactivity window.
    /// Also runs on every [`query`](Self::query) call.
    pub fn sweep(&self) {
        let mut entries = self.lock();
        Self::sweep_map(&mut entries, self.gc_time);
    }

    /// Remove everything. Teardown hook for test isolation; outstanding
    /// handles see their channel close.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock().contains_key(key)
    }

    // -- internals ---------------------------------------------------------

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<QueryKey, Entry>> {
        // A panic while holding the lock leaves plain data behind; recover.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply a finished fetch, unless the entry moved on without us.
    fn settle(&self, key: &QueryKey, generation: u64, result: Result<Value>) {
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            return; // evicted mid-flight
        };
        if entry.generation != generation {
            tracing::debug!(key = %key, "discarding stale response");
            return;
        }

        entry.in_flight = false;
        entry.last_used = Instant::now();
        let next = match result {
            Ok(value) => EntryState {
                data: Some(Arc::new(value)),
                error: None,
                status: QueryStatus::Success,
                fetch_status: FetchStatus::Idle,
            },
            Err(e) => {
                let prev = entry.tx.borrow().clone();
                EntryState {
                    data: prev.data,
                    error: Some(Arc::new(e)),
                    status: QueryStatus::Error,
                    fetch_status: FetchStatus::Idle,
                }
            }
        };
        entry.tx.send_replace(next);
    }

    fn sweep_map(entries: &mut HashMap<QueryKey, Entry>, gc_time: Duration) {
        let now = Instant::now();
        entries.retain(|key, entry| {
            let expired = entry.tx.receiver_count() == 0
                && !entry.in_flight
                && now.duration_since(entry.last_used) >= gc_time;
            if expired {
                tracing::debug!(key = %key, "evicting inactive cache entry");
            }
            !expired
        });
    }
}
