//! InMemory Room Registry 実装
//!
//! 有効な Room ID の集合を HashMap で保持します。
//! Room の削除操作は提供しません（プロセス再起動でのみ回収される —
//! ドキュメント化された制約であり、バグではない）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RoomId, RoomIdFactory, RoomRegistry, Timestamp};

/// インメモリ Room Registry 実装
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    /// Room ID と作成時刻のマップ
    rooms: Mutex<HashMap<RoomId, Timestamp>>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn create(&self, created_at: Timestamp) -> RoomId {
        let mut rooms = self.rooms.lock().await;

        // Retry-on-collision loop. The id space is 36^6, so this virtually
        // always completes on the first iteration.
        let room_id = loop {
            let candidate = RoomIdFactory::generate();
            if !rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        rooms.insert(room_id.clone(), created_at);
        tracing::info!("room '{}' created", room_id);
        room_id
    }

    async fn contains(&self, room_id: &RoomId) -> bool {
        let rooms = self.rooms.lock().await;
        rooms.contains_key(room_id)
    }

    async fn created_at(&self, room_id: &RoomId) -> Option<Timestamp> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).copied()
    }

    async fn count(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
