//! Prefix-group builder for bulk route construction.
//!
//! ```
//! use onion_router::http::Context;
//! use onion_router::routing::RouteGroup;
//! use axum::http::StatusCode;
//!
//! fn get_book(c: &mut Context) {
//!     let id = c.param("id").unwrap_or_default().to_string();
//!     c.string(StatusCode::OK, format!("book {id}"));
//! }
//!
//! let routes = RouteGroup::new("books").get("/:id", get_book).routes();
//! assert_eq!(routes[0].pattern(), "/books/:id");
//! ```
//!
//! Grouping only shapes patterns. Middleware stays global.

use axum::http::Method;

use crate::http::handler::Handler;
use crate::routing::router::Route;

/// Accumulates routes that share a path prefix.
///
/// Each pattern is `"/" + prefix + pattern`, concatenated as-is: no slashes
/// are added or collapsed beyond the leading one.
#[derive(Debug, Clone)]
pub struct RouteGroup {
    prefix: String,
    routes: Vec<Route>,
}

impl RouteGroup {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            routes: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Add a route for an arbitrary method.
    pub fn route<H: Handler>(mut self, method: Method, pattern: &str, handler: H) -> Self {
        let full = format!("/{}{}", self.prefix, pattern);
        self.routes.push(Route::new(method, full, handler));
        self
    }

    pub fn get<H: Handler>(self, pattern: &str, handler: H) -> Self {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post<H: Handler>(self, pattern: &str, handler: H) -> Self {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put<H: Handler>(self, pattern: &str, handler: H) -> Self {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn patch<H: Handler>(self, pattern: &str, handler: H) -> Self {
        self.route(Method::PATCH, pattern, handler)
    }

    pub fn delete<H: Handler>(self, pattern: &str, handler: H) -> Self {
        self.route(Method::DELETE, pattern, handler)
    }

    pub fn head<H: Handler>(self, pattern: &str, handler: H) -> Self {
        self.route(Method::HEAD, pattern, handler)
    }

    pub fn options<H: Handler>(self, pattern: &str, handler: H) -> Self {
        self.route(Method::OPTIONS, pattern, handler)
    }

    /// Finish the group, yielding its routes in the order they were added.
    pub fn routes(self) -> Vec<Route> {
        self.routes
    }
}
