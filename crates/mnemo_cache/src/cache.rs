//! Bounded TTL cache implementation.

use mnemo_core::{CachePolicy, CallKey};
use mnemo_error::ComputeError;
use parking_lot::{Condvar, Mutex};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Cache entry created on a miss; never updated in place.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// Mutable cache state, guarded by one mutex.
///
/// `access_order` tracks recency (front is coldest). `in_flight` holds keys
/// whose computation is currently running outside the lock; such keys have
/// no entry yet, and later callers for them wait instead of recomputing.
#[derive(Debug)]
struct CacheState<V> {
    entries: HashMap<CallKey, CacheEntry<V>>,
    access_order: Vec<CallKey>,
    in_flight: HashSet<CallKey>,
}

impl<V> CacheState<V> {
    /// Move a present key to the recent end of the access order.
    fn touch(&mut self, key: &CallKey) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            let key = self.access_order.remove(pos);
            self.access_order.push(key);
        }
    }

    /// Drop a key from the entry map and the access order.
    fn forget(&mut self, key: &CallKey) {
        self.entries.remove(key);
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }

    /// Evict the least recently used entry.
    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.first().cloned() {
            tracing::debug!(arity = key.arity(), "Evicting LRU entry");
            self.entries.remove(&key);
            self.access_order.remove(0);
        }
    }
}

/// Clears a key's in-flight marker if the computation unwinds.
///
/// Without this, a panicking computation would leave its marker set and
/// every later call for the key would wait on the condvar forever.
struct ClearOnUnwind<'a, V> {
    cache: &'a TtlCache<V>,
    key: &'a CallKey,
    armed: bool,
}

impl<V> Drop for ClearOnUnwind<'_, V> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.cache.state.lock();
            state.in_flight.remove(self.key);
            self.cache.settled.notify_all();
        }
    }
}

/// Per-callable bounded cache with expiration from time of write.
///
/// One `TtlCache` serves exactly one callable. Capacity and time-to-live
/// come from the callable's [`CachePolicy`], fixed at construction.
///
/// [`get_or_compute`](TtlCache::get_or_compute) is the only mutation path:
/// a live entry is returned as a hit, a miss runs the supplied computation
/// outside the lock and stores its result, and concurrent calls for the same
/// key collapse to a single computation. A failed computation is never
/// stored.
///
/// # Example
///
/// ```
/// use mnemo_cache::TtlCache;
/// use mnemo_core::{CachePolicy, CallKey};
/// use std::time::Duration;
///
/// let policy = CachePolicy::new(Duration::from_millis(200), 5).unwrap();
/// let cache: TtlCache<u64> = TtlCache::new(&policy);
///
/// let key = CallKey::new(vec!["Hi".into()]);
/// let value = cache.get_or_compute(key, || Ok(2)).unwrap();
/// assert_eq!(value, 2);
/// ```
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    max_size: usize,
    state: Mutex<CacheState<V>>,
    settled: Condvar,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache from a validated policy.
    ///
    /// Policies from [`CachePolicy::new`] or the builder are already within
    /// bounds; a policy produced by deserialization or the `with_` setters
    /// must pass [`CachePolicy::validate`] first. Out-of-range bounds here
    /// are a caller bug and trip a debug assertion.
    pub fn new(policy: &CachePolicy) -> Self {
        debug_assert!(policy.validate().is_ok(), "invalid cache policy");
        tracing::debug!(
            ttl = ?policy.ttl(),
            max_size = policy.max_size(),
            "Creating new TtlCache"
        );
        Self {
            ttl: *policy.ttl(),
            max_size: *policy.max_size(),
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                access_order: Vec::new(),
                in_flight: HashSet::new(),
            }),
            settled: Condvar::new(),
        }
    }

    /// Return the live value for `key`, or run `compute` and store its result.
    ///
    /// A hit refreshes the key's recency and returns a clone of the stored
    /// value without invoking `compute`. On a miss the computation runs with
    /// the lock released, so calls for other keys proceed independently;
    /// calls for the same key wait for the running computation and observe
    /// its stored value.
    ///
    /// A failure from `compute` stores nothing and surfaces as a
    /// [`ComputeError`] carrying the cause; waiters for that key re-attempt
    /// the computation themselves. A computation that unwinds releases the
    /// key the same way, so waiters never sleep past a panic.
    #[tracing::instrument(skip(self, key, compute), fields(arity = key.arity()))]
    pub fn get_or_compute<F>(&self, key: CallKey, compute: F) -> Result<V, ComputeError>
    where
        F: FnOnce() -> Result<V, Box<dyn std::error::Error + Send + Sync>>,
    {
        let mut state = self.state.lock();
        loop {
            if let Some(value) = self.lookup_live(&mut state, &key) {
                tracing::debug!("Cache hit");
                return Ok(value);
            }
            if state.in_flight.contains(&key) {
                // Same key is being computed; wait and re-check.
                self.settled.wait(&mut state);
                continue;
            }
            break;
        }
        state.in_flight.insert(key.clone());
        drop(state);

        let mut unwind_guard = ClearOnUnwind {
            cache: self,
            key: &key,
            armed: true,
        };
        let result = compute();
        unwind_guard.armed = false;
        drop(unwind_guard);

        let mut state = self.state.lock();
        state.in_flight.remove(&key);
        match result {
            Ok(value) => {
                self.store(&mut state, key, value.clone());
                self.settled.notify_all();
                Ok(value)
            }
            Err(source) => {
                // Nothing stored; the next call re-invokes the computation.
                self.settled.notify_all();
                Err(ComputeError::new(source))
            }
        }
    }

    /// Remove expired entries.
    ///
    /// Expiry is already honored on access; this purges the rest in one
    /// pass for callers that want to reclaim memory between calls.
    pub fn cleanup_expired(&self) -> usize {
        let mut state = self.state.lock();
        let before = state.entries.len();
        let ttl = self.ttl;

        let expired: Vec<CallKey> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            state.forget(key);
        }

        let removed = before - state.entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = state.entries.len(), "Purged expired entries");
        }
        removed
    }

    /// Clear all entries.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let count = state.entries.len();
        state.entries.clear();
        state.access_order.clear();
        tracing::debug!(cleared = count, "Cleared cache");
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Look up a live entry, purging it instead if expired.
    fn lookup_live(&self, state: &mut CacheState<V>, key: &CallKey) -> Option<V> {
        let expired = state.entries.get(key)?.is_expired(self.ttl);
        if expired {
            tracing::debug!("Cache entry expired, removing");
            state.forget(key);
            return None;
        }
        let value = state.entries.get(key).map(|entry| entry.value.clone());
        state.touch(key);
        value
    }

    /// Store a computed value, evicting the coldest entry at capacity.
    fn store(&self, state: &mut CacheState<V>, key: CallKey, value: V) {
        if state.entries.len() >= self.max_size && !state.entries.contains_key(&key) {
            state.evict_lru();
        }
        state.touch(&key);
        if !state.access_order.contains(&key) {
            state.access_order.push(key.clone());
        }
        state.entries.insert(
            key,
            CacheEntry {
                value,
                created_at: Instant::now(),
            },
        );
    }
}
