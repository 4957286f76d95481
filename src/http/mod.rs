//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower-http layers, body buffering)
//!     → request.rs (request ID, decoded routing path)
//!     → App::dispatch (routing + middleware + handler)
//!     → context.rs (Context, ResponseWriter → Response)
//!     → Send to client
//! ```

pub mod context;
pub mod handler;
pub mod request;
pub mod server;

pub use context::{Context, ResponseWriter};
pub use handler::{BoxedHandler, Handler};
pub use request::{DecodedPath, MakeRequestUuidV4, RequestIdExt, RoutingPathExt, X_REQUEST_ID};
pub use server::HttpServer;
