//! Sliding-window rate limiting for the login endpoint.
//!
//! Counters are kept behind the [`AttemptStore`] trait so the in-memory
//! single-process implementation can be swapped for a shared store in
//! multi-instance deployments without changing call sites. Every login
//! request from an origin counts toward the limit, successful or not.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use folio_core::error::CoreError;

/// The state of one origin's window after recording an attempt.
#[derive(Debug, Clone, Copy)]
pub struct WindowSnapshot {
    /// Attempts inside the window, including the one just recorded.
    pub count: u32,
    /// Time until the oldest attempt in the window expires.
    pub retry_after: Duration,
}

/// Storage for per-origin attempt timestamps.
pub trait AttemptStore: Send + Sync {
    /// Record an attempt for `key` at `now`, drop attempts older than
    /// `window`, and return the resulting window state.
    fn record(&self, key: &str, now: Instant, window: Duration) -> WindowSnapshot;
}

/// Process-local [`AttemptStore`] backed by a mutex-guarded map.
///
/// Adequate for the single-instance deployment target; a multi-instance
/// deployment would inject a shared implementation instead.
#[derive(Debug, Default)]
pub struct InMemoryAttemptStore {
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
}

impl InMemoryAttemptStore {
    /// Number of origins currently holding at least one recorded attempt.
    pub fn tracked_origins(&self) -> usize {
        self.attempts
            .lock()
            .expect("attempt store mutex poisoned")
            .len()
    }
}

impl AttemptStore for InMemoryAttemptStore {
    fn record(&self, key: &str, now: Instant, window: Duration) -> WindowSnapshot {
        let mut attempts = self.attempts.lock().expect("attempt store mutex poisoned");

        // Origins are attacker-controlled (forged X-Forwarded-For values),
        // so fully aged-out keys are evicted on every record or the map
        // grows without bound under rotating origins.
        attempts.retain(|_, stamps| stamps.iter().any(|t| now.duration_since(*t) < window));

        let entry = attempts.entry(key.to_string()).or_default();
        entry.retain(|t| now.duration_since(*t) < window);
        entry.push(now);

        let oldest = *entry.first().expect("entry just received a push");
        WindowSnapshot {
            count: entry.len() as u32,
            retry_after: window.saturating_sub(now.duration_since(oldest)),
        }
    }
}

/// Gate in front of credential verification: fails fast with `RateLimited`
/// once an origin exceeds `max_attempts` inside `window`.
pub struct LoginRateLimiter {
    store: Box<dyn AttemptStore>,
    max_attempts: u32,
    window: Duration,
}

impl LoginRateLimiter {
    /// Limiter with the in-memory store.
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self::with_store(Box::new(InMemoryAttemptStore::default()), max_attempts, window)
    }

    /// Limiter with an injected attempt store.
    pub fn with_store(store: Box<dyn AttemptStore>, max_attempts: u32, window: Duration) -> Self {
        Self {
            store,
            max_attempts,
            window,
        }
    }

    /// Record an attempt from `origin` and reject it if the origin has
    /// exceeded the window budget.
    pub fn check(&self, origin: &str, endpoint: &str) -> Result<(), CoreError> {
        self.check_at(origin, endpoint, Instant::now())
    }

    /// [`Self::check`] with an explicit clock, for deterministic tests.
    pub fn check_at(&self, origin: &str, endpoint: &str, now: Instant) -> Result<(), CoreError> {
        let snapshot = self.store.record(origin, now, self.window);
        if snapshot.count > self.max_attempts {
            tracing::warn!(origin, endpoint, count = snapshot.count, "Rate limit exceeded");
            return Err(CoreError::RateLimited {
                retry_after_secs: snapshot.retry_after.as_secs().max(1),
            });
        }
        Ok(())
    }
}
