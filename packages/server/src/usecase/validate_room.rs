//! UseCase: Room 検証処理

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry};

/// Room ID 検証のユースケース
///
/// Registry への純粋な lookup。フォーマット不正な ID は未知の ID と
/// 同様に扱う（呼び出し元にエラーの区別は不要）。
pub struct ValidateRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ValidateRoomUseCase {
    /// 新しい ValidateRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Room ID が有効かどうかを返す
    pub async fn execute(&self, raw_room_id: &str) -> bool {
        match RoomId::new(raw_room_id) {
            Ok(room_id) => self.registry.contains(&room_id).await,
            Err(_) => false,
        }
    }
}
