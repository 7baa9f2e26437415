//! InMemory Repository 実装
//!
//! プロセス存続期間のみ状態を保持します（永続化しないことは仕様上の制約）。

mod directory;
mod registry;
mod state;

pub use directory::InMemoryParticipantDirectory;
pub use registry::InMemoryRoomRegistry;
pub use state::InMemoryRoomStateStore;
