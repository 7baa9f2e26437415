//! Value objects for the room synchronization domain.

use rand::Rng;
use thiserror::Error;

/// Length of a room identifier in characters.
pub const ROOM_ID_LEN: usize = 6;

/// Alphabet a room identifier is drawn from (case-insensitive base36,
/// normalized to uppercase).
const ROOM_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Maximum length of a participant display name; longer input is truncated.
const DISPLAY_NAME_MAX_LEN: usize = 64;

/// Sentinel display name used until a participant sets one explicitly.
const ANONYMOUS_NAME: &str = "Anonymous";

/// Validation errors for value object construction
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("invalid room id '{0}': expected {ROOM_ID_LEN} alphanumeric characters")]
    InvalidRoomId(String),
    #[error("client id must not be empty")]
    EmptyClientId,
}

/// Room identifier: a short human-shareable token.
///
/// Always stored case-normalized (uppercase), so lookups are
/// case-insensitive for clients typing an id by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    /// Parse and normalize a raw room id.
    ///
    /// # Errors
    ///
    /// Returns [`ValueObjectError::InvalidRoomId`] unless the input is
    /// exactly [`ROOM_ID_LEN`] ASCII alphanumeric characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValueObjectError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.len() != ROOM_ID_LEN || !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ValueObjectError::InvalidRoomId(raw));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Factory generating fresh room identifiers.
///
/// Uniqueness is the registry's concern (retry-on-collision); the id space
/// of 36^6 combinations keeps collisions negligible.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a random room id.
    pub fn generate() -> RoomId {
        let mut rng = rand::thread_rng();
        let id: String = (0..ROOM_ID_LEN)
            .map(|_| ROOM_ID_CHARSET[rng.gen_range(0..ROOM_ID_CHARSET.len())] as char)
            .collect();
        RoomId(id)
    }
}

/// Connection identifier: unique per live connection, not per human.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Wrap an existing identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValueObjectError::EmptyClientId`] for empty input.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValueObjectError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValueObjectError::EmptyClientId);
        }
        Ok(Self(raw))
    }

    /// Generate a fresh identifier for a newly accepted connection.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participant display name.
///
/// Construction never fails: blank input falls back to the "Anonymous"
/// sentinel and over-long input is truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::anonymous();
        }
        let name = match trimmed.char_indices().nth(DISPLAY_NAME_MAX_LEN) {
            Some((idx, _)) => &trimmed[..idx],
            None => trimmed,
        };
        Self(name.to_string())
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for DisplayName {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// Unix timestamp in UTC milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_accepts_six_alphanumeric_chars() {
        // テスト項目: 6文字の英数字が RoomId として受理される
        // given (前提条件):
        let raw = "AB12CD";

        // when (操作):
        let result = RoomId::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "AB12CD");
    }

    #[test]
    fn test_room_id_normalizes_case() {
        // テスト項目: 小文字の入力が大文字に正規化される
        // given (前提条件):
        let raw = "ab12cd";

        // when (操作):
        let result = RoomId::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(result.as_str(), "AB12CD");
    }

    #[test]
    fn test_room_id_rejects_wrong_length() {
        // テスト項目: 長さが6文字でない入力が拒否される
        // given (前提条件):
        let too_short = "AB12";
        let too_long = "AB12CDE";

        // when (操作):
        let short_result = RoomId::new(too_short);
        let long_result = RoomId::new(too_long);

        // then (期待する結果):
        assert!(short_result.is_err());
        assert!(long_result.is_err());
    }

    #[test]
    fn test_room_id_rejects_non_alphanumeric() {
        // テスト項目: 英数字以外を含む入力が拒否される
        // given (前提条件):
        let raw = "AB-2CD";

        // when (操作):
        let result = RoomId::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::InvalidRoomId("AB-2CD".to_string())));
    }

    #[test]
    fn test_room_id_factory_generates_valid_ids() {
        // テスト項目: 生成された RoomId が常にフォーマットを満たす
        // given (前提条件):

        // when (操作):
        for _ in 0..100 {
            let id = RoomIdFactory::generate();

            // then (期待する結果):
            assert_eq!(id.as_str().len(), ROOM_ID_LEN);
            assert!(
                id.as_str()
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
            );
        }
    }

    #[test]
    fn test_client_id_rejects_empty_input() {
        // テスト項目: 空の client_id が拒否される
        // given (前提条件):
        let raw = "  ";

        // when (操作):
        let result = ClientId::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyClientId));
    }

    #[test]
    fn test_client_id_generate_is_unique() {
        // テスト項目: 生成された ClientId が一意である
        // given (前提条件):

        // when (操作):
        let a = ClientId::generate();
        let b = ClientId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_name_blank_falls_back_to_anonymous() {
        // テスト項目: 空白のみの名前が Anonymous にフォールバックする
        // given (前提条件):
        let raw = "   ";

        // when (操作):
        let name = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(name.as_str(), "Anonymous");
    }

    #[test]
    fn test_display_name_is_trimmed() {
        // テスト項目: 前後の空白が除去される
        // given (前提条件):
        let raw = "  Alice  ";

        // when (操作):
        let name = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_display_name_truncates_long_input() {
        // テスト項目: 長すぎる名前が最大長に切り詰められる
        // given (前提条件):
        let raw = "x".repeat(100);

        // when (操作):
        let name = DisplayName::new(&raw);

        // then (期待する結果):
        assert_eq!(name.as_str().chars().count(), 64);
    }
}
