//! UseCase: Room 参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - Room 参加処理（Registry 検証、Directory 登録、bootstrap スナップショット）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：未知の Room への参加が状態を変更しないこと
//! - 後から参加したクライアントが最新のスナップショットを受け取ること
//!   （late-join bootstrap 一貫性）
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効な Room への参加
//! - 異常系：未知の Room ID / フォーマット不正な ID での参加試行
//! - エッジケース：N 回の更新後に参加したクライアントのスナップショット

use std::sync::Arc;

use crate::domain::{
    ClientId, DisplayName, MessagePusher, Participant, ParticipantDirectory, PusherChannel,
    RoomId, RoomLockRegistry, RoomRegistry, RoomState, RoomStateStore,
};

use super::error::JoinRoomError;

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    state_store: Arc<dyn RoomStateStore>,
    directory: Arc<dyn ParticipantDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
    locks: Arc<RoomLockRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        state_store: Arc<dyn RoomStateStore>,
        directory: Arc<dyn ParticipantDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        locks: Arc<RoomLockRegistry>,
    ) -> Self {
        Self {
            registry,
            state_store,
            directory,
            message_pusher,
            locks,
        }
    }

    /// Room 参加を実行
    ///
    /// # Arguments
    ///
    /// * `raw_room_id` - クライアントが指定した Room ID（未検証）
    /// * `client_id` - 接続の識別子
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok((RoomId, RoomState))` - 正規化済み Room ID と bootstrap スナップショット
    /// * `Err(JoinRoomError)` - 参加失敗（状態は一切変更されない）
    pub async fn execute(
        &self,
        raw_room_id: &str,
        client_id: ClientId,
        sender: PusherChannel,
    ) -> Result<(RoomId, RoomState), JoinRoomError> {
        let room_id = RoomId::new(raw_room_id)
            .map_err(|_| JoinRoomError::RoomNotFound(raw_room_id.to_string()))?;
        if !self.registry.contains(&room_id).await {
            return Err(JoinRoomError::RoomNotFound(raw_room_id.to_string()));
        }

        let _guard = self.locks.acquire(&room_id).await;
        self.directory
            .join(
                &room_id,
                Participant::new(client_id.clone(), DisplayName::default()),
            )
            .await;
        self.message_pusher.register_client(client_id, sender).await;

        // Snapshot taken under the room lock: it reflects every update
        // applied before this join, never a partial one.
        let snapshot = self.state_store.get(&room_id).await;
        Ok((room_id, snapshot))
    }

    /// 現在の参加者リストのスナップショットを返す
    pub async fn participants(&self, room_id: &RoomId) -> Vec<Participant> {
        self.directory.list(room_id).await
    }

    /// 参加者リスト更新を Room 全員にブロードキャスト
    ///
    /// 新規参加者自身も含む：他のピアが新規参加者の既定名を知るのと同じ
    /// イベントで、参加者自身も確定した membership を受け取る。
    pub async fn broadcast_participants(&self, room_id: &RoomId, message: &str) {
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
