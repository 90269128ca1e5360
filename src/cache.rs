// ABOUTME: In-memory TTL cache with single-flight deduplication of concurrent computations
// ABOUTME: Lazy expiry on lookup is the correctness mechanism; the background sweep only bounds memory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Recipe Genie

//! Response cache with single-flight semantics.
//!
//! [`ResponseCache::get_or_compute`] guarantees at most one concurrent
//! computation per key: the first caller registers a pending slot under the
//! store's write lock and spawns the computation on its own task, then awaits
//! outside the lock; followers find the pending slot and await the same
//! outcome. Running the computation on a spawned task means a caller that
//! disconnects mid-flight never cancels work shared with other waiters.
//!
//! Failures are broadcast as `(ErrorCode, message)` pairs so every waiter
//! reconstructs its own error; successes are stored with the caller-provided
//! TTL and served to later lookups until they expire.

use crate::config::CacheConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::normalizer::CanonicalKey;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch, RwLock};
use tracing::{debug, warn};

/// Outcome broadcast to all waiters of one shared computation
type SharedOutcome<T> = Result<T, (ErrorCode, String)>;

/// Stored value with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// One slot per canonical key: either a cached value or an in-flight computation
enum Slot<T> {
    Ready(CacheEntry<T>),
    Pending(watch::Receiver<Option<SharedOutcome<T>>>),
}

type Store<T> = Arc<RwLock<HashMap<String, Slot<T>>>>;

/// TTL cache with single-flight deduplication
///
/// Cloning is cheap; clones share the same store, as the background sweep
/// task does.
#[derive(Clone)]
pub struct ResponseCache<T> {
    store: Store<T>,
    max_entries: usize,
    shutdown_tx: Option<Arc<mpsc::Sender<()>>>,
}

impl<T> ResponseCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a cache, optionally spawning the background sweep task
    ///
    /// Must be called from within a tokio runtime when
    /// `config.enable_background_cleanup` is set.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let store: Store<T> = Arc::new(RwLock::new(HashMap::new()));

        let shutdown_tx = if config.enable_background_cleanup {
            let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
            let store_clone = Arc::clone(&store);
            let cleanup_interval = config.cleanup_interval();

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(cleanup_interval);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            Self::sweep_expired(&store_clone).await;
                        }
                        _ = shutdown_rx.recv() => {
                            debug!("cache sweep task received shutdown signal");
                            break;
                        }
                    }
                }
            });

            Some(Arc::new(shutdown_tx))
        } else {
            None
        };

        Self {
            store,
            max_entries: config.max_entries,
            shutdown_tx,
        }
    }

    /// Look up a fresh entry, lazily removing it when expired
    pub async fn get(&self, key: &CanonicalKey) -> Option<T> {
        let mut store = self.store.write().await;
        match store.get(key.as_str()) {
            Some(Slot::Ready(entry)) if !entry.is_expired() => Some(entry.value.clone()),
            Some(Slot::Ready(_)) => {
                store.remove(key.as_str());
                None
            }
            _ => None,
        }
    }

    /// Resolve `key`, running `compute` at most once across concurrent callers
    ///
    /// A fresh cached value is returned immediately. Otherwise the first
    /// caller spawns `compute`; every concurrent caller for the same key
    /// receives its result. A successful result is stored with `ttl`; a
    /// failed computation leaves no entry behind, and its error is delivered
    /// to every waiter.
    ///
    /// # Errors
    ///
    /// Propagates the computation's error, or an internal error if the shared
    /// computation task was torn down before producing an outcome.
    pub async fn get_or_compute<F>(&self, key: &CanonicalKey, ttl: Duration, compute: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>> + Send + 'static,
    {
        let rx = {
            let mut store = self.store.write().await;

            match store.get(key.as_str()) {
                Some(Slot::Ready(entry)) if !entry.is_expired() => {
                    debug!(key = %key, "cache hit");
                    return Ok(entry.value.clone());
                }
                // A closed channel that never published means the producer
                // panicked; fall through and retake the slot
                Some(Slot::Pending(rx)) if rx.has_changed().is_ok() || rx.borrow().is_some() => {
                    debug!(key = %key, "joining in-flight computation");
                    rx.clone()
                }
                _ => {
                    // Miss or expired entry: register the pending slot before
                    // releasing the lock so followers can find it
                    if store.len() >= self.max_entries {
                        Self::drop_expired(&mut store);
                        if store.len() >= self.max_entries {
                            warn!(entries = store.len(), "cache entry bound exceeded");
                        }
                    }

                    let (tx, rx) = watch::channel(None);
                    store.insert(key.as_str().to_owned(), Slot::Pending(rx.clone()));

                    let store_clone = Arc::clone(&self.store);
                    let task_key = key.as_str().to_owned();
                    tokio::spawn(async move {
                        let outcome: SharedOutcome<T> =
                            compute.await.map_err(|e| (e.code, e.message));

                        let mut store = store_clone.write().await;
                        match &outcome {
                            Ok(value) => {
                                store.insert(
                                    task_key,
                                    Slot::Ready(CacheEntry::new(value.clone(), ttl)),
                                );
                            }
                            Err((code, message)) => {
                                debug!(code = ?code, message, "computation failed, dropping pending slot");
                                store.remove(&task_key);
                            }
                        }
                        drop(store);

                        // Waiters may all be gone already; that is fine
                        let _ = tx.send(Some(outcome));
                    });

                    rx
                }
            }
        };

        self.await_outcome(key, rx).await
    }

    /// Remove one entry
    pub async fn invalidate(&self, key: &CanonicalKey) {
        self.store.write().await.remove(key.as_str());
    }

    /// Number of slots currently held, including in-flight computations
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the cache holds no slots
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Wait for a shared computation to publish its outcome
    ///
    /// A sender dropped without publishing means the computation panicked or
    /// its task was torn down; the stale pending slot is removed so later
    /// callers recompute instead of waiting forever.
    async fn await_outcome(
        &self,
        key: &CanonicalKey,
        mut rx: watch::Receiver<Option<SharedOutcome<T>>>,
    ) -> AppResult<T> {
        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome.map_err(|(code, message)| AppError::new(code, message));
            }
            if rx.changed().await.is_err() {
                let mut store = self.store.write().await;
                let stale = matches!(
                    store.get(key.as_str()),
                    Some(Slot::Pending(current)) if current.same_channel(&rx)
                );
                if stale {
                    warn!(key = %key, "shared computation died without an outcome, clearing slot");
                    store.remove(key.as_str());
                }
                return Err(AppError::internal(
                    "shared computation ended without publishing an outcome",
                ));
            }
        }
    }

    /// Drop expired ready entries; pending slots are never evicted
    fn drop_expired(store: &mut HashMap<String, Slot<T>>) {
        store.retain(|_, slot| match slot {
            Slot::Ready(entry) => !entry.is_expired(),
            Slot::Pending(_) => true,
        });
    }

    /// Periodic sweep body shared with the background task
    async fn sweep_expired(store: &Store<T>) {
        let mut store = store.write().await;
        let before = store.len();
        Self::drop_expired(&mut store);
        let removed = before - store.len();
        drop(store);
        if removed > 0 {
            debug!(removed, "swept expired cache entries");
        }
    }
}

impl<T> Drop for ResponseCache<T> {
    fn drop(&mut self) {
        // Only the last clone may stop the sweep task; the sender Arc is
        // held exclusively by cache clones, so a strong count of one means
        // no other clone survives
        if let Some(tx) = &self.shutdown_tx {
            if Arc::strong_count(tx) == 1 {
                let _ = tx.try_send(());
            }
        }
    }
}
