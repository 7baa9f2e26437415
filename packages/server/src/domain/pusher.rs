//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ通知のインターフェース。
//! WebSocket を使った具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ClientId;

/// 接続ごとの outbound キュー容量。
/// 容量超過はその接続の切断を意味する（disconnect-on-overflow）。
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// クライアントへメッセージを送るためのチャンネル（bounded）
pub type PusherChannel = mpsc::Sender<String>;

/// メッセージ送信エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),
    #[error("outbound queue for client '{0}' overflowed")]
    QueueOverflow(String),
    #[error("connection for client '{0}' is closed")]
    ConnectionClosed(String),
}

/// MessagePusher trait
///
/// 送信は fire-and-forget：遅いクライアントが送信側の処理をブロックしない。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの sender を登録する
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel);

    /// クライアントの sender を登録解除する
    async fn unregister_client(&self, client_id: &ClientId);

    /// 特定のクライアントにメッセージを送信する
    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError>;

    /// 複数のクライアントにメッセージを送信する。
    /// 一部の送信失敗は許容される（失敗したクライアントは切断扱い）。
    async fn broadcast(&self, targets: Vec<ClientId>, content: &str);
}
