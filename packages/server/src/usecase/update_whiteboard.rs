//! UseCase: ホワイトボード更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateWhiteboardUseCase::execute() メソッド
//! - throttle ゲートによる高頻度更新の抑制と final フレームのバイパス
//!
//! ### なぜこのテストが必要か
//! - フリーハンド描画は毎秒多数の更新を生む：全フレームのブロードキャストは
//!   ネットワークを溢れさせる
//! - 抑制されたフレームは破棄される（バッファリングされない）が、最終状態が
//!   失われないことを保証する必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：ゲートを通過した更新の適用とブロードキャスト
//! - 抑制系：ゲート間隔内の連続更新
//! - エッジケース：final フラグ付きフレーム（pointer-release / clear / undo）

use std::sync::Arc;

use crate::domain::{
    ClientId, DrawingPayload, MessagePusher, ParticipantDirectory, RoomId, RoomLockRegistry,
    RoomStateStore, UpdateThrottle,
};

/// ホワイトボード更新の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhiteboardOutcome {
    /// 更新が適用され、ブロードキャストされた
    Applied(Vec<ClientId>),
    /// throttle ゲートにより破棄された（store もブロードキャストも変化なし）
    Suppressed,
}

/// ホワイトボード更新のユースケース
pub struct UpdateWhiteboardUseCase {
    state_store: Arc<dyn RoomStateStore>,
    directory: Arc<dyn ParticipantDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
    throttle: Arc<UpdateThrottle>,
    locks: Arc<RoomLockRegistry>,
}

impl UpdateWhiteboardUseCase {
    /// 新しい UpdateWhiteboardUseCase を作成
    pub fn new(
        state_store: Arc<dyn RoomStateStore>,
        directory: Arc<dyn ParticipantDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        throttle: Arc<UpdateThrottle>,
        locks: Arc<RoomLockRegistry>,
    ) -> Self {
        Self {
            state_store,
            directory,
            message_pusher,
            throttle,
            locks,
        }
    }

    /// ホワイトボード更新を実行
    ///
    /// final フレームは無条件にゲートをバイパスする：pointer-release や
    /// clear / undo / redo の確定状態は決して破棄されない。
    pub async fn execute(
        &self,
        room_id: &RoomId,
        origin: &ClientId,
        drawing: DrawingPayload,
        message: String,
    ) -> WhiteboardOutcome {
        if !drawing.is_final && !self.throttle.should_emit(origin).await {
            return WhiteboardOutcome::Suppressed;
        }

        let _guard = self.locks.acquire(room_id).await;

        self.state_store
            .merge_whiteboard_update(room_id, &drawing)
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

        WhiteboardOutcome::Applied(targets)
    }
}
