//! Request handlers for the HTTP API and the WebSocket session protocol.

pub mod http;
pub mod websocket;
