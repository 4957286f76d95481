//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger()
//!
//! Shutdown (shutdown.rs):
//!     trigger → broadcast → HttpServer stops accepting → drains → returns
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
