//! Conversion logic between DTOs and domain entities.

use crate::domain::entity::{DrawingPayload, Participant, RoomState};
use crate::domain::ExecutionResult;
use crate::infrastructure::dto::http::ExecuteResponse;
use crate::infrastructure::dto::websocket::{DrawingDto, ParticipantDto, ServerEvent};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<DrawingDto> for DrawingPayload {
    fn from(dto: DrawingDto) -> Self {
        Self {
            data_url: dto.data_url,
            width: dto.width,
            height: dto.height,
            timestamp: dto.timestamp,
            is_final: dto.is_final,
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<DrawingPayload> for DrawingDto {
    fn from(model: DrawingPayload) -> Self {
        Self {
            data_url: model.data_url,
            width: model.width,
            height: model.height,
            timestamp: model.timestamp,
            is_final: model.is_final,
        }
    }
}

impl From<&Participant> for ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
        }
    }
}

impl From<ExecutionResult> for ExecuteResponse {
    fn from(model: ExecutionResult) -> Self {
        Self {
            output: model.output,
            status: model.status,
            time: model.time,
            memory: model.memory,
        }
    }
}

impl ServerEvent {
    /// Bootstrap snapshot event from the store's current state.
    pub fn room_state(snapshot: RoomState) -> Self {
        Self::RoomState {
            code: snapshot.code,
            language: snapshot.language,
            whiteboard: snapshot.whiteboard,
        }
    }

    /// Membership event from a directory snapshot.
    pub fn participants_update(participants: &[Participant]) -> Self {
        Self::ParticipantsUpdate {
            participants: participants.iter().map(ParticipantDto::from).collect(),
        }
    }
}
