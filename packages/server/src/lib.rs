//! Room synchronization server for pairpad.
//!
//! This library implements the collaborative session engine: room
//! creation/validation, participant tracking, last-write-wins room state,
//! and WebSocket fan-out of code and whiteboard updates.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
