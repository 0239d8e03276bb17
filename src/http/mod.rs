//! HTTP and WebSocket handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → GET / with Upgrade: websocket → websocket.rs (per-connection loop)
//!     → GET / plain, GET /health      → health.rs
//! ```

pub mod health;
pub mod server;
pub mod websocket;

pub use server::{AppState, RelayServer, RunningServer};
