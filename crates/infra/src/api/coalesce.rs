//! Request de-duplication for idempotent reads
//!
//! Concurrent callers asking for the same key share one pending request.
//! The request runs on its own task, so it settles and its entry
//! disappears even when every caller has gone away. Nothing is cached
//! after settlement.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::errors::ApiError;

type SharedOutcome<V> = Shared<BoxFuture<'static, Result<V, ApiError>>>;
type InFlightMap<V> = Arc<Mutex<HashMap<String, InFlight<V>>>>;

struct InFlight<V> {
    generation: u64,
    future: SharedOutcome<V>,
}

/// Single-flight map of pending requests keyed by request identity
pub struct RequestCoalescer<V> {
    inflight: InFlightMap<V>,
    generation: AtomicU64,
}

impl<V> Default for RequestCoalescer<V> {
    fn default() -> Self {
        Self { inflight: Arc::new(Mutex::new(HashMap::new())), generation: AtomicU64::new(0) }
    }
}

impl<V> RequestCoalescer<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the pending request for `key`, or start one with `loader`.
    ///
    /// `loader` runs only when no request for `key` is pending. Every caller
    /// sharing a request receives a clone of the same outcome. Dropping a
    /// caller never cancels the request. Must be called inside a tokio
    /// runtime.
    pub async fn fetch_deduped<F, Fut>(&self, key: &str, loader: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>> + Send + 'static,
    {
        let shared = {
            let mut inflight = self.inflight.lock();
            match inflight.get(key) {
                Some(entry) => {
                    debug!(key = %key, "joining in-flight request");
                    entry.future.clone()
                }
                None => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed);
                    let task = tokio::spawn(settle_then_forget(
                        Arc::clone(&self.inflight),
                        key.to_string(),
                        generation,
                        loader(),
                    ));
                    let future = task.map(join_outcome).boxed().shared();
                    inflight.insert(
                        key.to_string(),
                        InFlight { generation, future: future.clone() },
                    );
                    debug!(key = %key, "started de-duplicated request");
                    future
                }
            }
        };

        shared.await
    }

    /// Whether a request for `key` is pending
    pub fn in_flight(&self, key: &str) -> bool {
        self.inflight.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inflight.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inflight.lock().is_empty()
    }
}

async fn settle_then_forget<V, Fut>(
    inflight: InFlightMap<V>,
    key: String,
    generation: u64,
    request: Fut,
) -> Result<V, ApiError>
where
    Fut: Future<Output = Result<V, ApiError>>,
{
    let outcome = request.await;
    forget(&inflight, &key, generation);
    outcome
}

fn forget<V>(inflight: &InFlightMap<V>, key: &str, generation: u64) {
    let mut map = inflight.lock();
    if map.get(key).is_some_and(|entry| entry.generation == generation) {
        map.remove(key);
    }
}

fn join_outcome<V>(
    joined: Result<Result<V, ApiError>, tokio::task::JoinError>,
) -> Result<V, ApiError> {
    joined.unwrap_or_else(|err| {
        warn!(error = %err, "de-duplicated request task failed");
        Err(ApiError::Unclassified(format!("Request task failed: {err}")))
    })
}

impl<V> std::fmt::Debug for RequestCoalescer<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCoalescer").field("in_flight", &self.inflight.lock().len()).finish()
    }
}
