//! UseCase: コード更新処理

use std::sync::Arc;

use crate::domain::{
    ClientId, MessagePusher, ParticipantDirectory, RoomId, RoomLockRegistry, RoomStateStore,
};

/// コード更新のユースケース
///
/// Room ロックを保持したまま store への書き込みとブロードキャストを行う。
/// これにより同じ Room の全ピアが同一の更新順序を観測する
/// （last-write-wins の収束に必要な条件）。
pub struct UpdateCodeUseCase {
    state_store: Arc<dyn RoomStateStore>,
    directory: Arc<dyn ParticipantDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
    locks: Arc<RoomLockRegistry>,
}

impl UpdateCodeUseCase {
    /// 新しい UpdateCodeUseCase を作成
    pub fn new(
        state_store: Arc<dyn RoomStateStore>,
        directory: Arc<dyn ParticipantDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        locks: Arc<RoomLockRegistry>,
    ) -> Self {
        Self {
            state_store,
            directory,
            message_pusher,
            locks,
        }
    }

    /// コード更新を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 接続が bind されている Room
    /// * `origin` - 更新を送信したクライアント（echo suppression の対象）
    /// * `code` / `language` - ペアで上書きされる新しい内容
    /// * `message` - ブロードキャストする JSON メッセージ（DTO 層で生成されたもの）
    ///
    /// # Returns
    ///
    /// ブロードキャスト対象となったクライアント ID リスト
    pub async fn execute(
        &self,
        room_id: &RoomId,
        origin: &ClientId,
        code: String,
        language: String,
        message: String,
    ) -> Vec<ClientId> {
        let _guard = self.locks.acquire(room_id).await;

        self.state_store
            .merge_code_update(room_id, code, language)
            .await;

        let targets: Vec<ClientId> = self
            .directory
            .list(room_id)
            .await
            .into_iter()
            .map(|p| p.id)
            .filter(|id| id != origin)
            .collect();
        self.message_pusher.broadcast(targets.clone(), &message).await;

        targets
    }
}
