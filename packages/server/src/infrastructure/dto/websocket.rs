//! WebSocket session protocol DTOs.
//!
//! Inbound traffic deserializes into the [`ClientEvent`] command enum; the
//! gateway dispatches on it and discards anything that fails to parse
//! (malformed events are an expected occurrence during connect/disconnect
//! races, not an error surfaced to the user).

use serde::{Deserialize, Serialize};

/// Events a client may send over the session channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinRoom {
        #[serde(rename = "roomId")]
        room_id: String,
    },
    SetName {
        name: String,
    },
    CodeChange {
        #[serde(rename = "roomId")]
        room_id: String,
        code: String,
        language: String,
    },
    WhiteboardChange {
        #[serde(rename = "roomId")]
        room_id: String,
        drawing: DrawingDto,
    },
}

/// Events the server pushes to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    JoinedRoom {
        #[serde(rename = "roomId")]
        room_id: String,
    },
    RoomError {
        error: String,
    },
    /// Bootstrap snapshot sent to a newly joined connection.
    RoomState {
        code: String,
        language: String,
        whiteboard: String,
    },
    ParticipantsUpdate {
        participants: Vec<ParticipantDto>,
    },
    CodeUpdate {
        code: String,
        language: String,
    },
    WhiteboardUpdate {
        drawing: DrawingDto,
    },
}

/// Full-canvas whiteboard frame as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingDto {
    #[serde(rename = "dataURL", default)]
    pub data_url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub timestamp: i64,
    /// Pointer-release / explicit-action frames; they bypass the throttle.
    #[serde(rename = "final", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
}
