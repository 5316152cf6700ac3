//! Per-callable cache registry.

use mnemo_cache::TtlCache;
use mnemo_core::{CachePolicy, MethodId};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use std::collections::HashMap;
use std::sync::Arc;

/// Lazily built mapping from callable identity to its cache.
///
/// Each [`MethodId`] gets exactly one [`TtlCache`], created on the first
/// observed call with the policy supplied for that identity and kept for the
/// registry's lifetime. Keys are append-only; a cache is never replaced.
///
/// Creation is race-safe without an exclusive lock on the lookup path:
/// steady-state lookups finish under a shared read lock, and only a miss
/// falls back to the upgradable slot. One thread holds that slot at a time,
/// so the policy provider and cache construction run at most once per
/// identity even when threads race to be first, while lookups for other
/// identities keep flowing.
#[derive(Debug)]
pub struct CacheRegistry<V> {
    caches: RwLock<HashMap<MethodId, Arc<TtlCache<V>>>>,
}

impl<V> Default for CacheRegistry<V> {
    fn default() -> Self {
        Self {
            caches: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> CacheRegistry<V> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            caches: RwLock::new(HashMap::new()),
        }
    }

    /// Get the cache for `method`, building it on first use.
    ///
    /// `provider` supplies the method's declared policy; it is invoked only
    /// when this call is the one that creates the cache.
    pub fn get_or_create<P>(&self, method: MethodId, provider: P) -> Arc<TtlCache<V>>
    where
        P: FnOnce(MethodId) -> CachePolicy,
    {
        if let Some(cache) = self.caches.read().get(&method) {
            return Arc::clone(cache);
        }

        // Miss: take the upgradable slot. Only one thread holds it at a
        // time, so the re-check and the provider run at most once per
        // identity, and plain lookups proceed until the upgrade to insert.
        let guard = self.caches.upgradable_read();
        if let Some(cache) = guard.get(&method) {
            return Arc::clone(cache);
        }

        let policy = provider(method);
        tracing::debug!(%method, ttl = ?policy.ttl(), max_size = policy.max_size(), "Creating cache for method");
        let cache = Arc::new(TtlCache::new(&policy));
        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        guard.insert(method, Arc::clone(&cache));
        cache
    }

    /// Look up an already-created cache.
    pub fn get(&self, method: MethodId) -> Option<Arc<TtlCache<V>>> {
        self.caches.read().get(&method).map(Arc::clone)
    }

    /// Number of registered callables.
    pub fn len(&self) -> usize {
        self.caches.read().len()
    }

    /// Check if no callable has been intercepted yet.
    pub fn is_empty(&self) -> bool {
        self.caches.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    const METHOD: MethodId = MethodId::new("Registry::test_method");
    const OTHER: MethodId = MethodId::new("Registry::other_method");

    fn policy() -> CachePolicy {
        CachePolicy::new(Duration::from_secs(1), 10).unwrap()
    }

    #[test]
    fn test_same_identity_returns_same_cache() {
        let registry: CacheRegistry<u64> = CacheRegistry::new();

        let first = registry.get_or_create(METHOD, |_| policy());
        let second = registry.get_or_create(METHOD, |_| policy());

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_provider_runs_once_per_identity() {
        let registry: CacheRegistry<u64> = CacheRegistry::new();
        let reads = AtomicUsize::new(0);

        for _ in 0..3 {
            registry.get_or_create(METHOD, |_| {
                reads.fetch_add(1, Ordering::SeqCst);
                policy()
            });
        }

        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_distinct_identities_get_distinct_caches() {
        let registry: CacheRegistry<u64> = CacheRegistry::new();

        // Identical policy values, still two separate caches.
        let first = registry.get_or_create(METHOD, |_| policy());
        let second = registry.get_or_create(OTHER, |_| policy());

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookups_proceed_while_another_identity_is_created() {
        let registry: Arc<CacheRegistry<u64>> = Arc::new(CacheRegistry::new());
        registry.get_or_create(METHOD, |_| policy());

        // Park a creation for OTHER inside its policy provider.
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let creator = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.get_or_create(OTHER, move |_| {
                    started_tx.send(()).unwrap();
                    release_rx.recv().unwrap();
                    policy()
                });
            })
        };
        started_rx.recv().unwrap();

        // A lookup for the existing identity must not wait on it.
        let (done_tx, done_rx) = mpsc::channel();
        {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.get_or_create(METHOD, |_| policy());
                done_tx.send(()).unwrap();
            });
        }
        done_rx
            .recv_timeout(Duration::from_secs(2))
            .expect("lookup stalled behind an unrelated cache creation");

        release_tx.send(()).unwrap();
        creator.join().unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_first_call_race_creates_one_cache() {
        let registry: Arc<CacheRegistry<u64>> = Arc::new(CacheRegistry::new());
        let reads = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let reads = Arc::clone(&reads);
                thread::spawn(move || {
                    registry.get_or_create(METHOD, move |_| {
                        reads.fetch_add(1, Ordering::SeqCst);
                        policy()
                    })
                })
            })
            .collect();

        let caches: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for cache in &caches[1..] {
            assert!(Arc::ptr_eq(&caches[0], cache));
        }
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }
}
