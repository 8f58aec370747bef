//! Request Coalescing and Result Caching
//!
//! Deduplicates concurrent generation requests by fingerprint and memoizes
//! completed results for a short window. Owned by the coordinator instance
//! and injected where needed; never process-global, so tests can construct
//! isolated instances.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio::sync::watch;

use crate::domain::generator::GenerationError;
use crate::domain::value_objects::RequestFingerprint;

/// Shared pending result of an in-flight generation
type PendingResult<T> = watch::Receiver<Option<Result<T, GenerationError>>>;

struct CacheEntry<T> {
    value: T,
    created_at: Instant,
}

/// Outcome of registering a caller against the in-flight registry
///
/// Computed while the registry lock is held so the lock can be released
/// before any `await`.
enum Registration<T> {
    /// Another caller already owns this fingerprint; await its result.
    Attached(PendingResult<T>),
    /// This caller is the owner and must run `produce`.
    Owner(watch::Sender<Option<Result<T, GenerationError>>>),
}

/// Coalesces identical in-flight requests and caches completed results
///
/// Guarantees at most one concurrent `produce` per fingerprint: the first
/// caller to register becomes the owner and runs `produce`; everyone else
/// attaches to the owner's pending result. The registry entry is removed on
/// every exit path, so a failed or abandoned produce never blocks future
/// attempts. Failures propagate to all waiters and are never cached.
pub struct GenerationCoalescer<T> {
    inflight: Mutex<HashMap<RequestFingerprint, PendingResult<T>>>,
    cache: Mutex<HashMap<RequestFingerprint, CacheEntry<T>>>,
    /// Entries older than this are never served
    cache_ttl: Duration,
    /// Entries older than this are removed by [`GenerationCoalescer::sweep_expired`]
    sweep_ttl: Duration,
}

impl<T> GenerationCoalescer<T>
where
    T: Clone,
{
    pub fn new(cache_ttl: Duration, sweep_ttl: Duration) -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
            cache: Mutex::new(HashMap::new()),
            cache_ttl,
            sweep_ttl,
        }
    }

    /// Run `produce` at most once per fingerprint across concurrent callers
    ///
    /// 1. A fresh cached result is returned without invoking `produce`.
    /// 2. If the same fingerprint is already in flight, this call awaits the
    ///    owner's result instead of producing again.
    /// 3. Otherwise this call registers itself as the owner, produces, and
    ///    publishes the outcome to every waiter.
    pub async fn coalesce<F, Fut>(
        &self,
        fingerprint: &RequestFingerprint,
        produce: F,
    ) -> Result<T, GenerationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, GenerationError>>,
    {
        if let Some(value) = self.fresh_cached(fingerprint) {
            tracing::debug!(fingerprint = %fingerprint, "Generation cache hit");
            return Ok(value);
        }

        // Check-and-insert under a single guard: two callers racing on the
        // same fresh fingerprint cannot both become the owner. The guard is
        // confined to this block so it is never held across an await.
        let registration = {
            let mut inflight = self.inflight.lock().expect("inflight registry poisoned");
            match inflight.get(fingerprint) {
                Some(rx) => Registration::Attached(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(None);
                    inflight.insert(fingerprint.clone(), rx);
                    Registration::Owner(tx)
                }
            }
        };

        let owner_tx = match registration {
            Registration::Attached(rx) => {
                tracing::debug!(fingerprint = %fingerprint, "Attached to in-flight generation");
                return Self::await_pending(rx).await;
            }
            Registration::Owner(tx) => tx,
        };

        // Registered as owner: the guard removes the registry entry on every
        // exit path, including cancellation mid-produce.
        let _cleanup = InflightGuard {
            inflight: &self.inflight,
            fingerprint,
        };

        let result = produce().await;

        if let Ok(value) = &result {
            let mut cache = self.cache.lock().expect("generation cache poisoned");
            cache.insert(
                fingerprint.clone(),
                CacheEntry {
                    value: value.clone(),
                    created_at: Instant::now(),
                },
            );
        }

        // Waiters may already be gone; a closed channel is fine.
        let _ = owner_tx.send(Some(result.clone()));

        result
    }

    /// Remove cache entries older than the sweep TTL
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let mut cache = self.cache.lock().expect("generation cache poisoned");
        let before = cache.len();
        cache.retain(|_, entry| entry.created_at.elapsed() <= self.sweep_ttl);
        before - cache.len()
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().expect("generation cache poisoned").len()
    }

    pub fn inflight_len(&self) -> usize {
        self.inflight
            .lock()
            .expect("inflight registry poisoned")
            .len()
    }

    fn fresh_cached(&self, fingerprint: &RequestFingerprint) -> Option<T> {
        let cache = self.cache.lock().expect("generation cache poisoned");
        cache
            .get(fingerprint)
            .filter(|entry| entry.created_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.value.clone())
    }

    async fn await_pending(mut rx: PendingResult<T>) -> Result<T, GenerationError> {
        loop {
            if let Some(result) = rx.borrow_and_update().as_ref() {
                return result.clone();
            }
            if rx.changed().await.is_err() {
                // Owner dropped without publishing a result
                return Err(GenerationError::Abandoned);
            }
        }
    }
}

/// Removes the in-flight registry entry when the owner is done
struct InflightGuard<'a, T> {
    inflight: &'a Mutex<HashMap<RequestFingerprint, PendingResult<T>>>,
    fingerprint: &'a RequestFingerprint,
}

impl<T> Drop for InflightGuard<'_, T> {
    fn drop(&mut self) {
        let mut inflight = self.inflight.lock().expect("inflight registry poisoned");
        inflight.remove(self.fingerprint);
    }
}
