//! Keyed Async Locks
//!
//! Per-key mutual exclusion for serializing writes to the same entity
//! across concurrent tasks. Tasks locking different keys do not contend.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

/// Map of async mutexes, one per key
///
/// `lock_for` hands out a shared handle to the key's mutex; holding the
/// handle alone does not exclude anyone, callers must `.lock().await` it.
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get (or create) the mutex for a key
    ///
    /// Lookup and insert happen under a single guard, so two tasks racing
    /// on the same fresh key always receive the same mutex.
    pub fn lock_for(&self, key: &K) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().expect("keyed lock map poisoned");
        locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Drop mutexes no task currently holds a handle to
    ///
    /// Returns the number of entries removed.
    pub fn prune(&self) -> usize {
        let mut locks = self.locks.lock().expect("keyed lock map poisoned");
        let before = locks.len();
        locks.retain(|_, m| Arc::strong_count(m) > 1);
        before - locks.len()
    }

    pub fn len(&self) -> usize {
        self.locks.lock().expect("keyed lock map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_same_key_serializes() {
        let locks = Arc::new(KeyedLocks::new());
        let concurrent = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let concurrent = concurrent.clone();
            let max_seen = max_seen.clone();
            handles.push(tokio::spawn(async move {
                let m = locks.lock_for(&"session-a");
                let _guard = m.lock().await;
                let now = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::task::yield_now().await;
                concurrent.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_contend() {
        let locks = KeyedLocks::new();
        let a = locks.lock_for(&1u32);
        let b = locks.lock_for(&2u32);

        let _ga = a.lock().await;
        // Must not deadlock: different key, different mutex.
        let _gb = b.lock().await;
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_prune_removes_unheld() {
        let locks = KeyedLocks::new();
        {
            let _m = locks.lock_for(&"x");
        }
        let held = locks.lock_for(&"y");
        assert_eq!(locks.len(), 2);

        let removed = locks.prune();
        assert_eq!(removed, 1);
        assert_eq!(locks.len(), 1);
        drop(held);
    }
}
