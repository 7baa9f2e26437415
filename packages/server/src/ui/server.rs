//! Server execution logic.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    CreateRoomUseCase, ExecuteCodeUseCase, JoinRoomUseCase, LeaveRoomUseCase, SetNameUseCase,
    UpdateCodeUseCase, UpdateWhiteboardUseCase, ValidateRoomUseCase,
};

use super::{
    handler::{
        http::{create_room, execute, health_check, validate_room},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Room synchronization server
///
/// This struct encapsulates the server configuration and provides methods to
/// run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     create_room_usecase,
///     validate_room_usecase,
///     join_room_usecase,
///     leave_room_usecase,
///     set_name_usecase,
///     update_code_usecase,
///     update_whiteboard_usecase,
///     execute_code_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    create_room_usecase: Arc<CreateRoomUseCase>,
    validate_room_usecase: Arc<ValidateRoomUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    set_name_usecase: Arc<SetNameUseCase>,
    update_code_usecase: Arc<UpdateCodeUseCase>,
    update_whiteboard_usecase: Arc<UpdateWhiteboardUseCase>,
    execute_code_usecase: Arc<ExecuteCodeUseCase>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_room_usecase: Arc<CreateRoomUseCase>,
        validate_room_usecase: Arc<ValidateRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        set_name_usecase: Arc<SetNameUseCase>,
        update_code_usecase: Arc<UpdateCodeUseCase>,
        update_whiteboard_usecase: Arc<UpdateWhiteboardUseCase>,
        execute_code_usecase: Arc<ExecuteCodeUseCase>,
    ) -> Self {
        Self {
            create_room_usecase,
            validate_room_usecase,
            join_room_usecase,
            leave_room_usecase,
            set_name_usecase,
            update_code_usecase,
            update_whiteboard_usecase,
            execute_code_usecase,
        }
    }

    /// Assemble the axum Router for this server.
    ///
    /// Exposed separately from [`Server::run`] so integration tests can bind
    /// the real Router on an ephemeral port.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            create_room_usecase: self.create_room_usecase,
            validate_room_usecase: self.validate_room_usecase,
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            set_name_usecase: self.set_name_usecase,
            update_code_usecase: self.update_code_usecase,
            update_whiteboard_usecase: self.update_whiteboard_usecase,
            execute_code_usecase: self.execute_code_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/rooms", post(create_room))
            .route("/api/rooms/{room_id}", get(validate_room))
            .route("/api/execute", post(execute))
            .route("/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the room synchronization server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "room synchronization server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // ConnectInfo gives handlers the peer address (execution rate limit
        // is keyed by client IP)
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
