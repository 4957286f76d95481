//! Route table: registration and lookup.
//!
//! # Responsibilities
//! - Store routes keyed by (method, pattern)
//! - Look up the first route matching a request method and path
//! - Return matched route plus bound parameters, or explicit no-match
//!
//! # Design Decisions
//! - Routes kept in a Vec; scan order is first-insertion order
//! - Re-registering a (method, pattern) key overwrites the handler in place,
//!   so the entry keeps its original scan position
//! - O(n) linear scan (acceptable for typical route counts)
//! - Ambiguous patterns resolve by scan order, not by priority
//! - A path that matches only under another method is a plain no-match

use std::fmt;

use axum::http::Method;

use crate::http::handler::{boxed, BoxedHandler, Handler};
use crate::routing::matcher::{Params, PathPattern};

/// A method, a pattern and the handler serving them.
#[derive(Clone)]
pub struct Route {
    method: Method,
    pattern: PathPattern,
    handler: BoxedHandler,
}

impl Route {
    pub fn new<H: Handler>(method: Method, pattern: impl Into<String>, handler: H) -> Self {
        Self::from_boxed(method, pattern, boxed(handler))
    }

    pub fn from_boxed(method: Method, pattern: impl Into<String>, handler: BoxedHandler) -> Self {
        Self {
            method,
            pattern: PathPattern::parse(pattern),
            handler,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn handler(&self) -> &BoxedHandler {
        &self.handler
    }

    fn same_key(&self, other: &Route) -> bool {
        self.method == other.method && self.pattern.as_str() == other.pattern.as_str()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: Params,
}

/// Registered routes in scan order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a route, replacing the handler of an existing route with the same
    /// method and pattern. Returns the replaced handler, if any.
    pub fn insert(&mut self, route: Route) -> Option<BoxedHandler> {
        match self.routes.iter_mut().find(|r| r.same_key(&route)) {
            Some(existing) => Some(std::mem::replace(&mut existing.handler, route.handler)),
            None => {
                self.routes.push(route);
                None
            }
        }
    }

    /// Find the first route, in scan order, whose method equals `method` and
    /// whose pattern matches `path`.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route
                    .pattern
                    .matches(path)
                    .map(|params| RouteMatch { route, params })
            })
    }

    pub fn contains(&self, method: &Method, pattern: &str) -> bool {
        self.routes
            .iter()
            .any(|r| r.method == *method && r.pattern.as_str() == pattern)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::context::Context;
    use axum::http::StatusCode;

    fn reply(body: &'static str) -> impl Fn(&mut Context) + Send + Sync + 'static {
        move |c: &mut Context| c.string(StatusCode::OK, body)
    }

    fn body_of(table: &RouteTable, method: Method, path: &str) -> Option<String> {
        let matched = table.lookup(&method, path)?;
        let mut ctx = Context::for_test(method, path, matched.params);
        matched.route.handler().call(&mut ctx);
        Some(String::from_utf8_lossy(ctx.response().body()).into_owned())
    }

    #[test]
    fn test_lookup_by_method_and_path() {
        let mut table = RouteTable::new();
        table.insert(Route::new(Method::GET, "/hello", reply("get")));
        table.insert(Route::new(Method::POST, "/hello", reply("post")));

        assert_eq!(body_of(&table, Method::GET, "/hello").as_deref(), Some("get"));
        assert_eq!(body_of(&table, Method::POST, "/hello").as_deref(), Some("post"));
        assert!(table.lookup(&Method::PUT, "/hello").is_none());
        assert!(table.lookup(&Method::GET, "/hello/").is_none());
    }

    #[test]
    fn test_method_is_case_sensitive() {
        let mut table = RouteTable::new();
        table.insert(Route::new(Method::GET, "/hello", reply("get")));

        let lower = Method::from_bytes(b"get").unwrap();
        assert!(table.lookup(&lower, "/hello").is_none());
    }

    #[test]
    fn test_duplicate_registration_overwrites() {
        let mut table = RouteTable::new();
        assert!(table.insert(Route::new(Method::GET, "/books", reply("first"))).is_none());
        assert!(table.insert(Route::new(Method::GET, "/books", reply("second"))).is_some());

        assert_eq!(table.len(), 1);
        assert_eq!(body_of(&table, Method::GET, "/books").as_deref(), Some("second"));
    }

    #[test]
    fn test_overwrite_keeps_scan_position() {
        let mut table = RouteTable::new();
        table.insert(Route::new(Method::GET, "/books/new", reply("literal")));
        table.insert(Route::new(Method::GET, "/books/:id", reply("param")));
        table.insert(Route::new(Method::GET, "/books/new", reply("literal-2")));

        let patterns: Vec<_> = table.routes().map(Route::pattern).collect();
        assert_eq!(patterns, vec!["/books/new", "/books/:id"]);
        assert_eq!(body_of(&table, Method::GET, "/books/new").as_deref(), Some("literal-2"));
    }

    #[test]
    fn test_ambiguous_patterns_resolve_by_insertion_order() {
        let mut literal_first = RouteTable::new();
        literal_first.insert(Route::new(Method::GET, "/books/new", reply("literal")));
        literal_first.insert(Route::new(Method::GET, "/books/:id", reply("param")));
        assert_eq!(body_of(&literal_first, Method::GET, "/books/new").as_deref(), Some("literal"));
        assert_eq!(body_of(&literal_first, Method::GET, "/books/9").as_deref(), Some("param"));

        let mut param_first = RouteTable::new();
        param_first.insert(Route::new(Method::GET, "/books/:id", reply("param")));
        param_first.insert(Route::new(Method::GET, "/books/new", reply("literal")));
        assert_eq!(body_of(&param_first, Method::GET, "/books/new").as_deref(), Some("param"));
    }

    #[test]
    fn test_lookup_binds_params() {
        let mut table = RouteTable::new();
        table.insert(Route::new(Method::GET, "/users/:id", reply("user")));

        let matched = table.lookup(&Method::GET, "/users/123").unwrap();
        assert_eq!(matched.route.pattern(), "/users/:id");
        assert_eq!(matched.params.get("id"), Some("123"));
        assert!(table.lookup(&Method::GET, "/users").is_none());
    }

    #[test]
    fn test_contains() {
        let mut table = RouteTable::new();
        assert!(table.is_empty());
        table.insert(Route::new(Method::DELETE, "/users/:id", reply("gone")));
        assert!(table.contains(&Method::DELETE, "/users/:id"));
        assert!(!table.contains(&Method::GET, "/users/:id"));
    }
}
