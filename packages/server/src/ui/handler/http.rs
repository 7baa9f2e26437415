//! HTTP API endpoint handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{ConnectInfo, Path, State},
    http::StatusCode,
};

use pairpad_shared::time::{get_utc_timestamp, timestamp_to_rfc3339};

use crate::{
    domain::ExecutionRequest,
    infrastructure::dto::http::{
        CreateRoomResponse, ErrorResponse, ExecuteRequest, ExecuteResponse, HealthResponse,
        ValidateRoomResponse,
    },
    ui::state::AppState,
    usecase::ExecuteCodeError,
};

/// Create a fresh room and return its id
pub async fn create_room(State(state): State<Arc<AppState>>) -> Json<CreateRoomResponse> {
    let room_id = state.create_room_usecase.execute().await;
    Json(CreateRoomResponse {
        room_id: room_id.into_string(),
    })
}

/// Validate a room id
pub async fn validate_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Json<ValidateRoomResponse> {
    let valid = state.validate_room_usecase.execute(&room_id).await;
    Json(ValidateRoomResponse { valid })
}

/// Run code in the execution sandbox
pub async fn execute(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (Some(code), Some(language)) = (request.code, request.language) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Code and language are required".to_string(),
            }),
        ));
    };

    let execution_request = ExecutionRequest {
        code,
        language,
        stdin: request.stdin,
    };

    match state
        .execute_code_usecase
        .execute(addr.ip(), execution_request)
        .await
    {
        Ok(result) => Ok(Json(result.into())),
        Err(ExecuteCodeError::RateLimited) => Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "Too many execution requests from this IP. Please try again later."
                    .to_string(),
            }),
        )),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: timestamp_to_rfc3339(get_utc_timestamp()),
    })
}
