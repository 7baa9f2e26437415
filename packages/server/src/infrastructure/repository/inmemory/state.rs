//! InMemory Room State Store 実装
//!
//! Room ごとの最新状態を HashMap で保持します。書き込みは到着順の
//! last-write-wins（Session Gateway が Room ごとに直列化するため、
//! タイムスタンプやベクタークロックによる比較は行わない）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DrawingPayload, RoomId, RoomState, RoomStateStore};

/// インメモリ Room State Store 実装
#[derive(Default)]
pub struct InMemoryRoomStateStore {
    states: Mutex<HashMap<RoomId, RoomState>>,
}

impl InMemoryRoomStateStore {
    /// 新しい InMemoryRoomStateStore を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStateStore for InMemoryRoomStateStore {
    async fn init(&self, room_id: &RoomId) {
        let mut states = self.states.lock().await;
        states.entry(room_id.clone()).or_default();
    }

    async fn get(&self, room_id: &RoomId) -> RoomState {
        let states = self.states.lock().await;
        // A room that has never received an update still gets a usable
        // default snapshot; this lookup never fails for a valid room.
        states.get(room_id).cloned().unwrap_or_default()
    }

    async fn merge_code_update(&self, room_id: &RoomId, code: String, language: String) {
        let mut states = self.states.lock().await;
        states
            .entry(room_id.clone())
            .or_default()
            .apply_code_update(code, language);
    }

    async fn merge_whiteboard_update(&self, room_id: &RoomId, drawing: &DrawingPayload) {
        let mut states = self.states.lock().await;
        states
            .entry(room_id.clone())
            .or_default()
            .apply_whiteboard_update(drawing);
    }
}
