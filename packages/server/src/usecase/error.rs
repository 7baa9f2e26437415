//! UseCase 層のエラー定義

use thiserror::Error;

/// Room への参加失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    /// 未知の Room ID（状態は一切変更されず、接続は unbound のまま）
    #[error("unknown room id '{0}'")]
    RoomNotFound(String),
}

/// コード実行リクエストの失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecuteCodeError {
    /// レートリミット超過
    #[error("too many execution requests")]
    RateLimited,
}
