//! UseCase: 表示名変更処理

use std::sync::Arc;

use crate::domain::{
    ClientId, DisplayName, MessagePusher, Participant, ParticipantDirectory, RoomId,
    RoomLockRegistry,
};

/// 表示名変更のユースケース
pub struct SetNameUseCase {
    directory: Arc<dyn ParticipantDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
    locks: Arc<RoomLockRegistry>,
}

impl SetNameUseCase {
    /// 新しい SetNameUseCase を作成
    pub fn new(
        directory: Arc<dyn ParticipantDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        locks: Arc<RoomLockRegistry>,
    ) -> Self {
        Self {
            directory,
            message_pusher,
            locks,
        }
    }

    /// 表示名を変更し、更新後の参加者リストを返す
    pub async fn execute(
        &self,
        room_id: &RoomId,
        client_id: &ClientId,
        name: DisplayName,
    ) -> Vec<Participant> {
        let _guard = self.locks.acquire(room_id).await;
        self.directory.rename(room_id, client_id, name).await;
        self.directory.list(room_id).await
    }

    /// 参加者リスト更新を origin 以外の Room メンバーにブロードキャスト
    /// （echo suppression: 変更したクライアント自身には返さない）
    pub async fn broadcast_roster(&self, room_id: &RoomId, origin: &ClientId, message: &str) {
        let targets: Vec<ClientId> = self
            .directory
            .list(room_id)
            .await
            .into_iter()
            .map(|p| p.id)
            .filter(|id| id != origin)
            .collect();
        self.message_pusher.broadcast(targets, message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OUTBOUND_QUEUE_CAPACITY, PusherChannel};
    use crate::infrastructure::message_pusher::WebSocketMessagePusher;
    use crate::infrastructure::repository::InMemoryParticipantDirectory;
    use crate::domain::RoomIdFactory;
    use tokio::sync::mpsc;

    fn create_usecase() -> (
        SetNameUseCase,
        Arc<InMemoryParticipantDirectory>,
        Arc<WebSocketMessagePusher>,
    ) {
        let directory = Arc::new(InMemoryParticipantDirectory::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = SetNameUseCase::new(
            directory.clone(),
            pusher.clone(),
            Arc::new(RoomLockRegistry::new()),
        );
        (usecase, directory, pusher)
    }

    fn channel() -> (PusherChannel, mpsc::Receiver<String>) {
        mpsc::channel(OUTBOUND_QUEUE_CAPACITY)
    }

    #[tokio::test]
    async fn test_rename_is_visible_in_roster() {
        // テスト項目: 名前を設定すると参加者リストに反映される
        // given (前提条件):
        let (usecase, directory, _pusher) = create_usecase();
        let room = RoomIdFactory::generate();
        let alice = ClientId::generate();
        directory
            .join(&room, Participant::new(alice.clone(), DisplayName::default()))
            .await;

        // when (操作):
        let roster = usecase
            .execute(&room, &alice, DisplayName::new("Alice"))
            .await;

        // then (期待する結果): {id: alice, name: "Alice"} が含まれる
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, alice);
        assert_eq!(roster[0].name.as_str(), "Alice");
    }

    #[tokio::test]
    async fn test_roster_broadcast_excludes_origin() {
        // テスト項目: 名前変更のブロードキャストが origin に返らない
        //             （echo suppression）
        // given (前提条件):
        let (usecase, directory, pusher) = create_usecase();
        let room = RoomIdFactory::generate();
        let alice = ClientId::generate();
        let bob = ClientId::generate();
        directory
            .join(&room, Participant::new(alice.clone(), DisplayName::default()))
            .await;
        directory
            .join(&room, Participant::new(bob.clone(), DisplayName::default()))
            .await;
        let (alice_tx, mut alice_rx) = channel();
        let (bob_tx, mut bob_rx) = channel();
        pusher.register_client(alice.clone(), alice_tx).await;
        pusher.register_client(bob.clone(), bob_tx).await;

        // when (操作):
        usecase.broadcast_roster(&room, &alice, "roster").await;

        // then (期待する結果): bob のみ受信する
        assert_eq!(bob_rx.recv().await, Some("roster".to_string()));
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_blank_name_falls_back_to_anonymous() {
        // テスト項目: 空の名前を設定すると Anonymous に戻る
        // given (前提条件):
        let (usecase, directory, _pusher) = create_usecase();
        let room = RoomIdFactory::generate();
        let alice = ClientId::generate();
        directory
            .join(&room, Participant::new(alice.clone(), DisplayName::new("Alice")))
            .await;

        // when (操作):
        let roster = usecase.execute(&room, &alice, DisplayName::new("")).await;

        // then (期待する結果):
        assert_eq!(roster[0].name.as_str(), "Anonymous");
    }
}
