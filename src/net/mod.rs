//! Network connection bookkeeping.
//!
//! Each server owns a `ConnectionTracker`. Every accepted WebSocket holds a
//! `ConnectionGuard` from it for its lifetime; the guard's id is attached to
//! the connection's tracing span.

pub mod connection;

pub use connection::{ConnectionGuard, ConnectionId, ConnectionTracker};
