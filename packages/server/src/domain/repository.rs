//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{DrawingPayload, Participant, RoomState},
    value_object::{ClientId, DisplayName, RoomId, Timestamp},
};

/// Room Registry trait
///
/// 有効な Room ID の集合とそのライフサイクルを管理する。
/// Room は明示的に削除されない（プロセス再起動でのみ回収される）。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 新しい Room を作成し、その ID を返す（衝突チェック付き）
    async fn create(&self, created_at: Timestamp) -> RoomId;

    /// Room ID が登録済みかどうかを返す（純粋な lookup）
    async fn contains(&self, room_id: &RoomId) -> bool;

    /// Room の作成時刻を返す（未登録の場合は None）
    async fn created_at(&self, room_id: &RoomId) -> Option<Timestamp>;

    /// 登録済み Room 数を返す
    async fn count(&self) -> usize;
}

/// Room State Store trait
///
/// Room ごとの最新状態（code / language / whiteboard）を保持する。
/// 書き込みは到着順の last-write-wins（§ Session Gateway の room ロック下で
/// 直列化されるためタイムスタンプ比較は不要）。
#[async_trait]
pub trait RoomStateStore: Send + Sync {
    /// Room 作成時に空の初期状態を登録する
    async fn init(&self, room_id: &RoomId);

    /// 現在の状態のスナップショットを返す。
    /// 一度も更新されていない Room には既定値を返し、決して失敗しない。
    async fn get(&self, room_id: &RoomId) -> RoomState;

    /// code と language をペアで上書きする
    async fn merge_code_update(&self, room_id: &RoomId, code: String, language: String);

    /// whiteboard フィールドのみを上書きする。
    /// 空の画像 blob を持つ更新は no-op（クリアではない）。
    async fn merge_whiteboard_update(&self, room_id: &RoomId, drawing: &DrawingPayload);
}

/// Participant Directory trait
///
/// (RoomId, ClientId) をキーとする参加者レコードを管理する。
#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    /// 参加者を Room に登録する
    async fn join(&self, room_id: &RoomId, participant: Participant);

    /// 参加者の表示名を変更する（未登録の場合は no-op）
    async fn rename(&self, room_id: &RoomId, client_id: &ClientId, name: DisplayName);

    /// 参加者を Room から削除する。
    /// 既に存在しない ClientId に対しては no-op（冪等 — 重複した切断通知を許容）。
    async fn leave(&self, room_id: &RoomId, client_id: &ClientId);

    /// 参加者リストのスナップショットを返す（挿入順、防御的コピー）
    async fn list(&self, room_id: &RoomId) -> Vec<Participant>;
}
