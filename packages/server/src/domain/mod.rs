//! Domain layer: value objects, entities, and the trait seams the
//! usecase layer depends on (dependency inversion — implementations live
//! in the infrastructure layer).

pub mod entity;
pub mod executor;
pub mod pusher;
pub mod repository;
pub mod sync;
pub mod throttle;
pub mod value_object;

pub use entity::{DEFAULT_LANGUAGE, DrawingPayload, Participant, RoomState};
pub use executor::{CodeExecutor, ExecuteError, ExecutionRequest, ExecutionResult};
pub use pusher::{MessagePushError, MessagePusher, OUTBOUND_QUEUE_CAPACITY, PusherChannel};
pub use repository::{ParticipantDirectory, RoomRegistry, RoomStateStore};
pub use sync::RoomLockRegistry;
pub use throttle::{
    EXECUTION_LIMIT_MAX, EXECUTION_LIMIT_WINDOW, FixedWindowLimiter, UpdateThrottle,
    WHITEBOARD_EMIT_INTERVAL,
};
pub use value_object::{
    ClientId, DisplayName, RoomId, RoomIdFactory, Timestamp, ValueObjectError,
};
