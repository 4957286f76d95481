//! Application: route registration and per-request dispatch.
//!
//! # Data Flow
//! ```text
//! Configuration phase (single-threaded):
//!     AppBuilder::handle / use_routes / use_middleware / not_found_handler
//!     → AppBuilder::build()
//!     → App (immutable, shared via Arc)
//!
//! Per request:
//!     App::dispatch(request)
//!     → RouteTable::lookup(method, path)
//!     → no match: not-found handler
//!     → match: Context { request, params }
//!              → every middleware, in registration order
//!              → route handler
//!     → Response
//! ```
//!
//! # Design Decisions
//! - `App` has no registration methods, so routes and middleware are
//!   read-only once serving starts and need no locking
//! - Middleware runs only for matched requests
//! - Middleware cannot short-circuit: the whole chain runs and then the
//!   handler runs, even if a middleware already wrote a response. The status
//!   committed first is kept and later body writes append.
//! - Panics from handlers or middleware are not caught here

use std::fmt;
use std::time::Instant;

use axum::body::Bytes;
use axum::http::header::{HeaderValue, X_CONTENT_TYPE_OPTIONS};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;

use crate::http::context::Context;
use crate::http::handler::{boxed, BoxedHandler, Handler};
use crate::http::request::RoutingPathExt;
use crate::observability::metrics::{self, DispatchOutcome};
use crate::routing::matcher::Params;
use crate::routing::router::{Route, RouteMatch, RouteTable};

/// Body written by the default not-found handler.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

fn default_not_found(c: &mut Context) {
    c.response_mut()
        .set_header(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    c.string(StatusCode::NOT_FOUND, NOT_FOUND_BODY);
}

/// Collects routes and middleware before serving begins.
pub struct AppBuilder {
    routes: RouteTable,
    middlewares: Vec<BoxedHandler>,
    not_found: BoxedHandler,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            routes: RouteTable::new(),
            middlewares: Vec::new(),
            not_found: boxed(default_not_found),
        }
    }

    /// Register a handler for `method` and `pattern`. Registering the same
    /// method and pattern again replaces the earlier handler.
    pub fn handle<H: Handler>(self, method: Method, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Route::new(method, pattern, handler))
    }

    pub fn get<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.handle(Method::GET, pattern, handler)
    }

    pub fn post<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.handle(Method::POST, pattern, handler)
    }

    pub fn put<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.handle(Method::PUT, pattern, handler)
    }

    pub fn patch<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.handle(Method::PATCH, pattern, handler)
    }

    pub fn delete<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.handle(Method::DELETE, pattern, handler)
    }

    pub fn head<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.handle(Method::HEAD, pattern, handler)
    }

    pub fn options<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.handle(Method::OPTIONS, pattern, handler)
    }

    /// Register a prebuilt route.
    pub fn route(mut self, route: Route) -> Self {
        let method = route.method().clone();
        let pattern = route.pattern().to_string();

        if self.routes.insert(route).is_some() {
            tracing::warn!(method = %method, pattern = %pattern, "Route re-registered, handler replaced");
        } else {
            tracing::debug!(method = %method, pattern = %pattern, "Route registered");
        }
        self
    }

    /// Register every route of every group, e.g. the output of
    /// [`RouteGroup::routes`](crate::routing::RouteGroup::routes).
    pub fn use_routes<I>(self, groups: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoIterator<Item = Route>,
    {
        groups
            .into_iter()
            .flatten()
            .fold(self, |builder, route| builder.route(route))
    }

    /// Append a middleware to the global chain.
    pub fn use_middleware<H: Handler>(mut self, middleware: H) -> Self {
        self.middlewares.push(boxed(middleware));
        self
    }

    /// Replace the not-found handler. The last call wins.
    pub fn not_found_handler<H: Handler>(mut self, handler: H) -> Self {
        self.not_found = boxed(handler);
        self
    }

    /// Freeze the configuration.
    pub fn build(self) -> App {
        tracing::info!(
            routes = self.routes.len(),
            middlewares = self.middlewares.len(),
            "Application built"
        );
        App {
            routes: self.routes,
            middlewares: self.middlewares,
            not_found: self.not_found,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable routing configuration; the request dispatcher.
pub struct App {
    routes: RouteTable,
    middlewares: Vec<BoxedHandler>,
    not_found: BoxedHandler,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    /// Route lookup without running anything.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.lookup(method, path)
    }

    /// Serve one request: match, run middleware, run the handler.
    pub fn dispatch(&self, request: Request<Bytes>) -> Response {
        let start = Instant::now();

        let (handler, params, outcome) = match self.lookup(request.method(), request.routing_path()) {
            Some(RouteMatch { route, params }) => (route.handler(), params, DispatchOutcome::Matched),
            None => {
                tracing::debug!(
                    method = %request.method(),
                    path = %request.routing_path(),
                    "No route matched"
                );
                (&self.not_found, Params::new(), DispatchOutcome::NotFound)
            }
        };

        let mut ctx = Context::new(request, params);
        if outcome == DispatchOutcome::Matched {
            for middleware in &self.middlewares {
                middleware.call(&mut ctx);
            }
        }
        handler.call(&mut ctx);

        let response = ctx.into_response();
        metrics::record_dispatch(outcome, response.status().as_u16(), start);
        response
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("routes", &self.routes)
            .field("middlewares", &self.middlewares.len())
            .finish_non_exhaustive()
    }
}
