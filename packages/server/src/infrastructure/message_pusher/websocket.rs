//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの bounded outbound チャンネル（`PusherChannel`）を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、メッセージ送信に使用します。
//!
//! 送信は `try_send` による fire-and-forget：遅いクライアントが送信側を
//! ブロックすることはありません。キューが溢れた接続は切断扱いとなり、
//! sender がマップから除去されます（disconnect-on-overflow）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::{ClientId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの outbound sender
    ///
    /// Key: ClientId
    /// Value: PusherChannel
    clients: Mutex<HashMap<ClientId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中のクライアント数を返す
    pub async fn client_count(&self) -> usize {
        let clients = self.clients.lock().await;
        clients.len()
    }
}

fn push_error(client_id: &ClientId, err: &TrySendError<String>) -> MessagePushError {
    match err {
        TrySendError::Full(_) => MessagePushError::QueueOverflow(client_id.as_str().to_string()),
        TrySendError::Closed(_) => {
            MessagePushError::ConnectionClosed(client_id.as_str().to_string())
        }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("client '{}' registered to MessagePusher", client_id);
        clients.insert(client_id, sender);
    }

    async fn unregister_client(&self, client_id: &ClientId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id);
        tracing::debug!("client '{}' unregistered from MessagePusher", client_id);
    }

    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError> {
        let mut clients = self.clients.lock().await;

        let Some(sender) = clients.get(client_id) else {
            return Err(MessagePushError::ClientNotFound(
                client_id.as_str().to_string(),
            ));
        };

        match sender.try_send(content.to_string()) {
            Ok(()) => Ok(()),
            Err(e) => {
                // 溢れた・閉じた接続の sender を除去して切断扱いにする
                let err = push_error(client_id, &e);
                clients.remove(client_id);
                tracing::warn!("dropping client '{}': {}", client_id, err);
                Err(err)
            }
        }
    }

    async fn broadcast(&self, targets: Vec<ClientId>, content: &str) {
        let mut clients = self.clients.lock().await;

        let mut dead: Vec<ClientId> = Vec::new();
        for target in targets {
            let Some(sender) = clients.get(&target) else {
                tracing::warn!("client '{}' not found during broadcast, skipping", target);
                continue;
            };
            if let Err(e) = sender.try_send(content.to_string()) {
                tracing::warn!(
                    "failed to push message to client '{}': {}",
                    target,
                    push_error(&target, &e)
                );
                dead.push(target);
            } else {
                tracing::trace!("broadcasted message to client '{}'", target);
            }
        }

        for target in dead {
            clients.remove(&target);
        }
    }
}
