//! Domain entities: per-room mutable state and participant records.

use super::value_object::{ClientId, DisplayName};

/// Language tag a room starts with before any code update arrives.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Latest authoritative snapshot of a room's shared surfaces.
///
/// Fields are independently overwritten: a code update never touches the
/// whiteboard and vice versa. `code` and `language` are always written
/// together as a pair so the editor never renders code under a stale
/// language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomState {
    pub code: String,
    pub language: String,
    /// Whiteboard snapshot as an opaque data-URL blob. Empty until the
    /// first drawing arrives.
    pub whiteboard: String,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            code: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            whiteboard: String::new(),
        }
    }
}

impl RoomState {
    /// Overwrite `code` and `language` atomically as a pair.
    pub fn apply_code_update(&mut self, code: String, language: String) {
        self.code = code;
        self.language = language;
    }

    /// Overwrite the whiteboard snapshot.
    ///
    /// An update carrying an empty image blob is a no-op, not a clear:
    /// clearing goes through an explicit update carrying a real blank-canvas
    /// image.
    pub fn apply_whiteboard_update(&mut self, drawing: &DrawingPayload) {
        if !drawing.data_url.is_empty() {
            self.whiteboard = drawing.data_url.clone();
        }
    }
}

/// Full-canvas whiteboard frame submitted by a client.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingPayload {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    /// Client-side capture time in UTC milliseconds; carried through to
    /// peers unchanged, never used for ordering.
    pub timestamp: i64,
    /// Marks a pointer-release or explicit action (clear, undo, redo, text
    /// commit). Final frames bypass the update throttle.
    pub is_final: bool,
}

/// One live connection's presence record within a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ClientId,
    pub name: DisplayName,
}

impl Participant {
    pub fn new(id: ClientId, name: DisplayName) -> Self {
        Self { id, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing(data_url: &str) -> DrawingPayload {
        DrawingPayload {
            data_url: data_url.to_string(),
            width: 800,
            height: 600,
            timestamp: 1_700_000_000_000,
            is_final: false,
        }
    }

    #[test]
    fn test_default_room_state() {
        // テスト項目: 初期状態は空のコードと python 言語タグを持つ
        // given (前提条件):

        // when (操作):
        let state = RoomState::default();

        // then (期待する結果):
        assert_eq!(state.code, "");
        assert_eq!(state.language, "python");
        assert_eq!(state.whiteboard, "");
    }

    #[test]
    fn test_apply_code_update_writes_pair() {
        // テスト項目: コードと言語がペアで上書きされる
        // given (前提条件):
        let mut state = RoomState::default();

        // when (操作):
        state.apply_code_update("print(1)".to_string(), "python".to_string());
        state.apply_code_update("console.log(1)".to_string(), "javascript".to_string());

        // then (期待する結果): 最後の書き込みが勝つ
        assert_eq!(state.code, "console.log(1)");
        assert_eq!(state.language, "javascript");
    }

    #[test]
    fn test_code_update_does_not_touch_whiteboard() {
        // テスト項目: コード更新がホワイトボードに影響しない
        // given (前提条件):
        let mut state = RoomState::default();
        state.apply_whiteboard_update(&drawing("data:image/png;base64,abc"));

        // when (操作):
        state.apply_code_update("x = 1".to_string(), "python".to_string());

        // then (期待する結果):
        assert_eq!(state.whiteboard, "data:image/png;base64,abc");
    }

    #[test]
    fn test_whiteboard_update_with_empty_blob_is_noop() {
        // テスト項目: 空の画像 blob を持つ更新は no-op であり、クリアではない
        // given (前提条件):
        let mut state = RoomState::default();
        state.apply_whiteboard_update(&drawing("data:image/png;base64,abc"));

        // when (操作):
        state.apply_whiteboard_update(&drawing(""));

        // then (期待する結果): 以前のスナップショットが保持される
        assert_eq!(state.whiteboard, "data:image/png;base64,abc");
    }
}
