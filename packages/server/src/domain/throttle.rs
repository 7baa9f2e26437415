//! Time-gated admission: the whiteboard update throttle and the fixed-window
//! limiter guarding the execution endpoint.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::value_object::ClientId;

/// Minimum interval between whiteboard broadcasts per connection.
pub const WHITEBOARD_EMIT_INTERVAL: Duration = Duration::from_millis(100);

/// Monotonic-clock gate admitting at most one emit per interval per
/// connection (leaky bucket of one).
///
/// Suppressed updates are dropped, not buffered: every whiteboard frame
/// carries the full canvas, so dropping an intermediate frame only coalesces
/// drawing data. Final frames (pointer-release, clear, undo, redo, text
/// commit) bypass the gate at the call site so the authoritative end state
/// is never dropped.
pub struct UpdateThrottle {
    interval: Duration,
    last_emit: Mutex<HashMap<ClientId, Instant>>,
}

impl UpdateThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `true` at most once per interval per connection, and records
    /// the emit time when it does.
    pub async fn should_emit(&self, client_id: &ClientId) -> bool {
        let mut last_emit = self.last_emit.lock().await;
        let now = Instant::now();
        match last_emit.get(client_id) {
            Some(last) if now.duration_since(*last) < self.interval => false,
            _ => {
                last_emit.insert(client_id.clone(), now);
                true
            }
        }
    }

    /// Release gate state for a disconnected connection.
    pub async fn forget(&self, client_id: &ClientId) {
        let mut last_emit = self.last_emit.lock().await;
        last_emit.remove(client_id);
    }
}

impl Default for UpdateThrottle {
    fn default() -> Self {
        Self::new(WHITEBOARD_EMIT_INTERVAL)
    }
}

/// Window of the execution-endpoint limiter.
pub const EXECUTION_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Requests admitted per window per caller.
pub const EXECUTION_LIMIT_MAX: u32 = 100;

/// Fixed-window rate limiter keyed by caller identity (peer IP for the
/// execution endpoint). Admits up to `max` requests per window; the window
/// resets `window` after its first request.
pub struct FixedWindowLimiter<K: Eq + Hash + Clone + Send> {
    window: Duration,
    max: u32,
    hits: Mutex<HashMap<K, (Instant, u32)>>,
}

impl<K: Eq + Hash + Clone + Send> FixedWindowLimiter<K> {
    pub fn new(window: Duration, max: u32) -> Self {
        Self {
            window,
            max,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request from `key` and return whether it is admitted.
    pub async fn check(&self, key: &K) -> bool {
        let mut hits = self.hits.lock().await;
        let now = Instant::now();
        match hits.get_mut(key) {
            Some((start, count)) if now.duration_since(*start) < self.window => {
                if *count < self.max {
                    *count += 1;
                    true
                } else {
                    false
                }
            }
            _ => {
                hits.insert(key.clone(), (now, 1));
                true
            }
        }
    }
}
