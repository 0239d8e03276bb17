//! Wire protocol: JSON envelopes exchanged over the WebSocket.
//!
//! # Frame Shapes
//! ```text
//! request:  { "type", "requestId", "name", "battleType"?, "trainer"? }
//! success:  { "requestId", "type": "<requestType>Response", "name", "data" }
//! error:    { "requestId"?, "type": "error", "message" }
//! ```
//!
//! `requestId` is the only correlation mechanism; replies on one connection
//! may arrive in any order.

pub mod envelope;
pub mod error;

pub use envelope::{RequestEnvelope, ResponseEnvelope, ERROR_TYPE, RESPONSE_SUFFIX};
pub use error::{RelayError, RelayResult};
