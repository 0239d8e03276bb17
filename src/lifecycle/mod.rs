//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build router → RelayServer::start
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Shutdown::trigger → stop accepting,
//!     close open WebSockets → RunningServer resolves
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
