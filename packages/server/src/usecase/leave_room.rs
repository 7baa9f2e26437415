//! UseCase: Room 退出処理

use std::sync::Arc;

use crate::domain::{
    ClientId, MessagePusher, Participant, ParticipantDirectory, RoomId, RoomLockRegistry,
    UpdateThrottle,
};

/// Room 退出のユースケース
///
/// 切断通知（明示的な close・transport 障害）から呼ばれる。
/// 二重の切断通知に備えてすべてのステップが冪等である。
pub struct LeaveRoomUseCase {
    directory: Arc<dyn ParticipantDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
    throttle: Arc<UpdateThrottle>,
    locks: Arc<RoomLockRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(
        directory: Arc<dyn ParticipantDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        throttle: Arc<UpdateThrottle>,
        locks: Arc<RoomLockRegistry>,
    ) -> Self {
        Self {
            directory,
            message_pusher,
            throttle,
            locks,
        }
    }

    /// Room 退出を実行し、残りの参加者リストを返す
    pub async fn execute(&self, room_id: &RoomId, client_id: &ClientId) -> Vec<Participant> {
        let _guard = self.locks.acquire(room_id).await;

        self.directory.leave(room_id, client_id).await;
        self.message_pusher.unregister_client(client_id).await;
        self.throttle.forget(client_id).await;

        self.directory.list(room_id).await
    }

    /// 参加者リスト更新を残りの Room メンバー全員にブロードキャスト
    pub async fn broadcast_roster(&self, room_id: &RoomId, message: &str) {
        let targets: Vec<ClientId> = self
            .directory
            .list(room_id)
            .await
            .into_iter()
            .map(|p| p.id)
            .collect();
        self.message_pusher.broadcast(targets, message).await;
    }
}
