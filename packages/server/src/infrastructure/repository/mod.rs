//! Repository 実装
//!
//! ドメイン層が定義する Repository trait の具体的な実装を提供します。
//!
//! - `inmemory`: HashMap をインメモリ DB として使用する実装
//! - 将来的に: `redis`, `postgres` など

pub mod inmemory;

pub use inmemory::{InMemoryParticipantDirectory, InMemoryRoomRegistry, InMemoryRoomStateStore};
