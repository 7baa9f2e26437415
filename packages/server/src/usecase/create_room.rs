//! UseCase: Room 作成処理

use std::sync::Arc;

use pairpad_shared::time::Clock;

use crate::domain::{RoomId, RoomRegistry, RoomStateStore, Timestamp};

/// Room 作成のユースケース
///
/// Registry に新しい Room を登録し、State Store に空の初期状態を seed する。
pub struct CreateRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    state_store: Arc<dyn RoomStateStore>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        state_store: Arc<dyn RoomStateStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            state_store,
            clock,
        }
    }

    /// Room を作成し、その ID を返す
    pub async fn execute(&self) -> RoomId {
        let created_at = Timestamp::new(self.clock.now_utc_millis());
        let room_id = self.registry.create(created_at).await;
        self.state_store.init(&room_id).await;
        room_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomState;
    use crate::infrastructure::repository::{InMemoryRoomRegistry, InMemoryRoomStateStore};
    use pairpad_shared::time::FixedClock;

    fn create_usecase() -> (
        CreateRoomUseCase,
        Arc<InMemoryRoomRegistry>,
        Arc<InMemoryRoomStateStore>,
    ) {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let state_store = Arc::new(InMemoryRoomStateStore::new());
        let usecase = CreateRoomUseCase::new(
            registry.clone(),
            state_store.clone(),
            Arc::new(FixedClock::new(1_700_000_000_000)),
        );
        (usecase, registry, state_store)
    }

    #[tokio::test]
    async fn test_create_room_registers_id() {
        // テスト項目: 作成された Room ID が registry に登録される
        // given (前提条件):
        let (usecase, registry, _state_store) = create_usecase();

        // when (操作):
        let room_id = usecase.execute().await;

        // then (期待する結果): 6文字の英数字 ID が有効になっている
        assert_eq!(room_id.as_str().len(), 6);
        assert!(registry.contains(&room_id).await);
        assert_eq!(
            registry.created_at(&room_id).await,
            Some(Timestamp::new(1_700_000_000_000))
        );
    }

    #[tokio::test]
    async fn test_create_room_seeds_empty_state() {
        // テスト項目: 作成直後の Room に空の初期状態が seed される
        // given (前提条件):
        let (usecase, _registry, state_store) = create_usecase();

        // when (操作):
        let room_id = usecase.execute().await;

        // then (期待する結果): code="", language="python", whiteboard=""
        assert_eq!(state_store.get(&room_id).await, RoomState::default());
    }

    #[tokio::test]
    async fn test_create_room_ids_do_not_collide() {
        // テスト項目: 複数回の作成で ID が衝突しない
        // given (前提条件):
        let (usecase, registry, _state_store) = create_usecase();

        // when (操作):
        for _ in 0..20 {
            usecase.execute().await;
        }

        // then (期待する結果):
        assert_eq!(registry.count().await, 20);
    }
}
