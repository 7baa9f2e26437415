//! Data Transfer Objects (DTOs) for the room synchronization server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: session protocol events (client→server and server→client)
//! - `http`: room lifecycle / execution API bodies

pub mod conversion;
pub mod http;
pub mod websocket;
