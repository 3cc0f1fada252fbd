use std::collections::{HashMap, VecDeque};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crate::solver::{SolveError, SwapSolver};

/// Number of solved stages a [`SolveCache`] remembers by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

// unit/group separators cannot appear in word fragments, so keys built from
// lengths plus element content cannot collide across different sequence pairs
const VALUE_SEPARATOR: char = '\u{1f}';
const SEQUENCE_SEPARATOR: char = '\u{1e}';

fn cache_key(shuffled: &[String], target: &[String]) -> String {
    let content: usize = shuffled.iter().chain(target).map(|value| value.len() + 1).sum();
    let mut key = String::with_capacity(content + 8);
    key.push_str(&shuffled.len().to_string());
    for value in shuffled {
        key.push(VALUE_SEPARATOR);
        key.push_str(value);
    }
    key.push(SEQUENCE_SEPARATOR);
    key.push_str(&target.len().to_string());
    for value in target {
        key.push(VALUE_SEPARATOR);
        key.push_str(value);
    }
    key
}

struct CacheInner {
    entries: HashMap<String, usize>,
    // keys ordered least- to most-recently used
    recency: VecDeque<String>,
}

/// A bounded, thread-safe memoization layer in front of [`SwapSolver`],
/// keyed by the (shuffled, target) sequence pair and evicted least-recently
/// used once full.
///
/// Construct one per process and hand it around in an [`Arc`]; keeping the
/// cache an explicit instance rather than a process-wide singleton lets every
/// test start from a fresh one.
///
/// The recency-ordered map is not safe for concurrent access on its own, so
/// one dedicated lock serializes every read and write; reads also refresh
/// recency and therefore write. Once a result for a key has been inserted,
/// all later reads of that key on any thread return the cached value.
pub struct SolveCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl Default for SolveCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveCache {
    /// A cache holding up to [`DEFAULT_CACHE_CAPACITY`] results.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A cache holding up to `capacity` results.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(capacity),
                recency: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    /// The number of results currently cached.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether no result is cached yet.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, key: &str) -> Option<usize> {
        let mut inner = self.lock();
        let swaps = inner.entries.get(key).copied()?;
        if let Some(at) = inner.recency.iter().position(|held| held == key) {
            inner.recency.remove(at);
        }
        inner.recency.push_back(key.to_owned());
        Some(swaps)
    }

    fn insert(&self, key: String, swaps: usize) {
        let mut inner = self.lock();
        if inner.entries.insert(key.clone(), swaps).is_some() {
            if let Some(at) = inner.recency.iter().position(|held| *held == key) {
                inner.recency.remove(at);
            }
        }
        inner.recency.push_back(key);
        while inner.entries.len() > self.capacity {
            match inner.recency.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Look up or compute the minimum swap count for a sequence pair,
    /// giving up after `timeout`.
    ///
    /// A cached pair returns immediately. Otherwise the solver runs on a
    /// background thread; if it beats the deadline its result is returned
    /// (and cached), and if not the call returns `Ok(None)` — a first-class
    /// "no answer yet", not a failure. A timed-out attempt is never cached
    /// as such: the abandoned worker keeps running to completion and inserts
    /// its result, so a later call for the same stage gets an instant hit.
    ///
    /// Invalid sequence pairs fail fast with a [`SolveError`] before any
    /// cache or solver work happens.
    pub fn solve_cached(
        self: &Arc<Self>,
        shuffled: &[String],
        target: &[String],
        timeout: Duration,
    ) -> Result<Option<usize>, SolveError> {
        let solver = SwapSolver::new(shuffled, target)?;
        let key = cache_key(shuffled, target);

        if let Some(swaps) = self.lookup(&key) {
            tracing::debug!(swaps, "solve cache hit");
            return Ok(Some(swaps));
        }

        let (sender, receiver) = mpsc::channel();
        let cache = Arc::clone(self);
        thread::spawn(move || {
            let swaps = solver.solve();
            cache.insert(key, swaps);
            // the caller may have timed out and dropped the receiver already
            let _ = sender.send(swaps);
        });

        match receiver.recv_timeout(timeout) {
            Ok(swaps) => Ok(Some(swaps)),
            Err(RecvTimeoutError::Timeout) => {
                tracing::debug!(?timeout, "swap solve still running at deadline");
                Ok(None)
            }
            Err(RecvTimeoutError::Disconnected) => Ok(None),
        }
    }
}
