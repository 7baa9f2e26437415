//! InMemory Participant Directory 実装
//!
//! (RoomId, ClientId) をキーとする参加者レコードを HashMap + Vec で保持し、
//! 挿入順を維持します。`list` は防御的なスナップショットコピーを返すため、
//! ブロードキャスト中に membership が変化しても反復は安全です。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientId, DisplayName, Participant, ParticipantDirectory, RoomId};

/// インメモリ Participant Directory 実装
#[derive(Default)]
pub struct InMemoryParticipantDirectory {
    rooms: Mutex<HashMap<RoomId, Vec<Participant>>>,
}

impl InMemoryParticipantDirectory {
    /// 新しい InMemoryParticipantDirectory を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantDirectory for InMemoryParticipantDirectory {
    async fn join(&self, room_id: &RoomId, participant: Participant) {
        let mut rooms = self.rooms.lock().await;
        let members = rooms.entry(room_id.clone()).or_default();
        match members.iter_mut().find(|p| p.id == participant.id) {
            // 同一接続の再 join は名前の上書きとして扱う
            Some(existing) => existing.name = participant.name,
            None => members.push(participant),
        }
    }

    async fn rename(&self, room_id: &RoomId, client_id: &ClientId, name: DisplayName) {
        let mut rooms = self.rooms.lock().await;
        if let Some(members) = rooms.get_mut(room_id)
            && let Some(participant) = members.iter_mut().find(|p| &p.id == client_id)
        {
            participant.name = name;
        }
    }

    async fn leave(&self, room_id: &RoomId, client_id: &ClientId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(members) = rooms.get_mut(room_id) {
            // 冪等: 既に存在しない ClientId は no-op
            members.retain(|p| &p.id != client_id);
        }
    }

    async fn list(&self, room_id: &RoomId) -> Vec<Participant> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomIdFactory;

    fn participant(name: &str) -> Participant {
        Participant::new(ClientId::generate(), DisplayName::new(name))
    }

    #[tokio::test]
    async fn test_join_defaults_to_anonymous() {
        // テスト項目: join 直後の参加者が Anonymous として記録される
        // given (前提条件):
        let directory = InMemoryParticipantDirectory::new();
        let room = RoomIdFactory::generate();

        // when (操作):
        directory
            .join(&room, Participant::new(ClientId::generate(), DisplayName::default()))
            .await;

        // then (期待する結果):
        let members = directory.list(&room).await;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name.as_str(), "Anonymous");
    }

    #[tokio::test]
    async fn test_list_preserves_join_order() {
        // テスト項目: list が join 順を維持したスナップショットを返す
        // given (前提条件):
        let directory = InMemoryParticipantDirectory::new();
        let room = RoomIdFactory::generate();
        let alice = participant("Alice");
        let bob = participant("Bob");
        let charlie = participant("Charlie");

        // when (操作):
        directory.join(&room, alice.clone()).await;
        directory.join(&room, bob.clone()).await;
        directory.join(&room, charlie.clone()).await;

        // then (期待する結果):
        let members = directory.list(&room).await;
        let names: Vec<&str> = members.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);
    }

    #[tokio::test]
    async fn test_rename_updates_display_name() {
        // テスト項目: rename により表示名が更新される
        // given (前提条件):
        let directory = InMemoryParticipantDirectory::new();
        let room = RoomIdFactory::generate();
        let member = Participant::new(ClientId::generate(), DisplayName::default());
        directory.join(&room, member.clone()).await;

        // when (操作):
        directory
            .rename(&room, &member.id, DisplayName::new("Alice"))
            .await;

        // then (期待する結果):
        let members = directory.list(&room).await;
        assert_eq!(members[0].name.as_str(), "Alice");
    }

    #[tokio::test]
    async fn test_rename_unknown_participant_is_noop() {
        // テスト項目: 未登録の参加者への rename が no-op である
        // given (前提条件):
        let directory = InMemoryParticipantDirectory::new();
        let room = RoomIdFactory::generate();

        // when (操作):
        directory
            .rename(&room, &ClientId::generate(), DisplayName::new("Ghost"))
            .await;

        // then (期待する結果):
        assert!(directory.list(&room).await.is_empty());
    }

    #[tokio::test]
    async fn test_leave_is_idempotent() {
        // テスト項目: 同じ接続に対する leave の二重呼び出しが一度の呼び出しと
        //             同じ membership を残す（重複した切断通知の許容）
        // given (前提条件):
        let directory = InMemoryParticipantDirectory::new();
        let room = RoomIdFactory::generate();
        let alice = participant("Alice");
        let bob = participant("Bob");
        directory.join(&room, alice.clone()).await;
        directory.join(&room, bob.clone()).await;

        // when (操作):
        directory.leave(&room, &alice.id).await;
        directory.leave(&room, &alice.id).await;

        // then (期待する結果):
        let members = directory.list(&room).await;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, bob.id);
    }

    #[tokio::test]
    async fn test_list_returns_defensive_copy() {
        // テスト項目: list が返すスナップショットはその後の変更に影響されない
        // given (前提条件):
        let directory = InMemoryParticipantDirectory::new();
        let room = RoomIdFactory::generate();
        let alice = participant("Alice");
        directory.join(&room, alice.clone()).await;

        // when (操作):
        let snapshot = directory.list(&room).await;
        directory.leave(&room, &alice.id).await;

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert!(directory.list(&room).await.is_empty());
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        // テスト項目: ある Room の membership が別の Room に現れない
        // given (前提条件):
        let directory = InMemoryParticipantDirectory::new();
        let room_a = RoomIdFactory::generate();
        let room_b = RoomIdFactory::generate();

        // when (操作):
        directory.join(&room_a, participant("Alice")).await;

        // then (期待する結果):
        assert!(directory.list(&room_b).await.is_empty());
    }
}
