//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `POST /api/rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    #[serde(rename = "roomId")]
    pub room_id: String,
}

/// Response body of `GET /api/rooms/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRoomResponse {
    pub valid: bool,
}

/// Request body of `POST /api/execute`.
///
/// `code` and `language` are optional at the serde level so the handler can
/// answer a missing field with 400 instead of a framework rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    pub code: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stdin: String,
}

/// Response body of `POST /api/execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub output: String,
    pub status: String,
    pub time: String,
    pub memory: String,
}

/// Error body for rejected API requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
