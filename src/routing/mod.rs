//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! RequestEnvelope (type, requestId, name, ...)
//!     → router.rs (handler lookup by exact `type`)
//!     → handler.rs (RequestHandler::handle)
//!     → ResponseEnvelope (success or error)
//! ```
//!
//! # Design Decisions
//! - Handlers registered at startup, immutable at runtime
//! - Deterministic: same type always reaches the same handler
//! - Unknown types answered by the router itself

pub mod handler;
pub mod router;

pub use handler::RequestHandler;
pub use router::MessageRouter;
