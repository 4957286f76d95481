//! Request router with `:param` path matching and a global middleware chain.
//!
//! ```
//! use axum::http::StatusCode;
//! use onion_router::{App, Context, RouteGroup};
//!
//! let books = RouteGroup::new("books")
//!     .get("/:id", |c: &mut Context| {
//!         let id = c.param("id").unwrap_or_default().to_string();
//!         c.string(StatusCode::OK, id);
//!     })
//!     .routes();
//!
//! let app = App::builder()
//!     .use_middleware(|c: &mut Context| tracing::info!(path = %c.path(), "request"))
//!     .use_routes([books])
//!     .build();
//!
//! assert!(app.lookup(&axum::http::Method::GET, "/books/42").is_some());
//! ```

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use app::{App, AppBuilder};
pub use config::ServerConfig;
pub use http::{Context, Handler, HttpServer};
pub use lifecycle::Shutdown;
pub use routing::{Route, RouteGroup};
