//! Server state shared across request handlers.

use std::sync::Arc;

use crate::usecase::{
    CreateRoomUseCase, ExecuteCodeUseCase, JoinRoomUseCase, LeaveRoomUseCase, SetNameUseCase,
    UpdateCodeUseCase, UpdateWhiteboardUseCase, ValidateRoomUseCase,
};

/// Shared application state
pub struct AppState {
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub validate_room_usecase: Arc<ValidateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub set_name_usecase: Arc<SetNameUseCase>,
    pub update_code_usecase: Arc<UpdateCodeUseCase>,
    pub update_whiteboard_usecase: Arc<UpdateWhiteboardUseCase>,
    pub execute_code_usecase: Arc<ExecuteCodeUseCase>,
}
