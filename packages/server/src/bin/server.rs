//! Room synchronization server for collaborative code editing and
//! whiteboarding.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pairpad-server
//! cargo run --bin pairpad-server -- --host 0.0.0.0 --port 3001
//! ```

use std::sync::Arc;

use clap::Parser;

use pairpad_server::{
    domain::{
        EXECUTION_LIMIT_MAX, EXECUTION_LIMIT_WINDOW, FixedWindowLimiter, RoomLockRegistry,
        UpdateThrottle,
    },
    infrastructure::{
        executor::{PistonExecutor, piston::DEFAULT_PISTON_URL},
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryParticipantDirectory, InMemoryRoomRegistry, InMemoryRoomStateStore},
    },
    ui::Server,
    usecase::{
        CreateRoomUseCase, ExecuteCodeUseCase, JoinRoomUseCase, LeaveRoomUseCase, SetNameUseCase,
        UpdateCodeUseCase, UpdateWhiteboardUseCase, ValidateRoomUseCase,
    },
};
use pairpad_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "pairpad-server")]
#[command(about = "Room synchronization server for collaborative editing", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Piston execute endpoint used by the code execution API
    #[arg(long, default_value = DEFAULT_PISTON_URL)]
    piston_url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher + room locks + throttle
    // 3. UseCases
    // 4. Server

    // 1. Create repositories (in-memory, process-lifetime only)
    let registry = Arc::new(InMemoryRoomRegistry::new());
    let state_store = Arc::new(InMemoryRoomStateStore::new());
    let directory = Arc::new(InMemoryParticipantDirectory::new());

    // 2. Create MessagePusher, per-room locks, and the update throttle
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let locks = Arc::new(RoomLockRegistry::new());
    let throttle = Arc::new(UpdateThrottle::default());
    let clock = Arc::new(SystemClock);
    let executor = Arc::new(PistonExecutor::new(args.piston_url));
    let execution_limiter = Arc::new(FixedWindowLimiter::new(
        EXECUTION_LIMIT_WINDOW,
        EXECUTION_LIMIT_MAX,
    ));

    // 3. Create UseCases
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(
        registry.clone(),
        state_store.clone(),
        clock.clone(),
    ));
    let validate_room_usecase = Arc::new(ValidateRoomUseCase::new(registry.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        state_store.clone(),
        directory.clone(),
        message_pusher.clone(),
        locks.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        directory.clone(),
        message_pusher.clone(),
        throttle.clone(),
        locks.clone(),
    ));
    let set_name_usecase = Arc::new(SetNameUseCase::new(
        directory.clone(),
        message_pusher.clone(),
        locks.clone(),
    ));
    let update_code_usecase = Arc::new(UpdateCodeUseCase::new(
        state_store.clone(),
        directory.clone(),
        message_pusher.clone(),
        locks.clone(),
    ));
    let update_whiteboard_usecase = Arc::new(UpdateWhiteboardUseCase::new(
        state_store.clone(),
        directory.clone(),
        message_pusher.clone(),
        throttle.clone(),
        locks.clone(),
    ));
    let execute_code_usecase = Arc::new(ExecuteCodeUseCase::new(executor, execution_limiter));

    // 4. Create and run the server
    let server = Server::new(
        create_room_usecase,
        validate_room_usecase,
        join_room_usecase,
        leave_room_usecase,
        set_name_usecase,
        update_code_usecase,
        update_whiteboard_usecase,
        execute_code_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
