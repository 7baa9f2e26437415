//! Per-room serialization.
//!
//! All mutating operations for one room (state-store writes, directory
//! writes, broadcast fan-out) run under that room's exclusive async lock, so
//! every participant observes the same total order of updates. Locks are
//! per-room, so a slow room never stalls another.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::value_object::RoomId;

/// Guard proving the caller holds a room's exclusive lock.
pub type RoomGuard = OwnedMutexGuard<()>;

/// Hands out one async mutex per room.
///
/// Lock entries are never removed: rooms are never deleted, and an idle
/// entry is a single `Arc<Mutex<()>>`.
#[derive(Default)]
pub struct RoomLockRegistry {
    locks: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl RoomLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive lock for a room, creating it on first use.
    pub async fn acquire(&self, room_id: &RoomId) -> RoomGuard {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(room_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
