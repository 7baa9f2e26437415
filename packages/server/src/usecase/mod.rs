//! UseCase layer: one struct per gateway operation, with collaborators
//! injected as `Arc<dyn Trait>` so tests can substitute isolated instances.

mod create_room;
mod error;
mod execute_code;
mod join_room;
mod leave_room;
mod set_name;
mod update_code;
mod update_whiteboard;
mod validate_room;

pub use create_room::CreateRoomUseCase;
pub use error::{ExecuteCodeError, JoinRoomError};
pub use execute_code::ExecuteCodeUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use set_name::SetNameUseCase;
pub use update_code::UpdateCodeUseCase;
pub use update_whiteboard::{UpdateWhiteboardUseCase, WhiteboardOutcome};
pub use validate_room::ValidateRoomUseCase;
