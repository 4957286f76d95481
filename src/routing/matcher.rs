//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile a registered pattern into literal and parameter segments
//! - Match a request path against a compiled pattern
//! - Capture `:name` segments into [`Params`]
//!
//! # Design Decisions
//! - Patterns and paths split on `/`; segment counts must agree
//! - Literal segments compare byte for byte (case-sensitive)
//! - Captured values are raw: no validation, no percent-decoding
//! - Empty segments are ordinary segments, so `/books` != `/books/`
//! - No regex, no wildcards, no backtracking: one left-to-right pass

use std::collections::hash_map;
use std::collections::HashMap;

/// Marks a pattern segment as a named parameter.
pub const PARAM_SIGIL: char = ':';

/// Path parameters captured by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value bound to `name`, if the matched pattern declared it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A route pattern compiled once at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: impl Into<String>) -> Self {
        let raw = pattern.into();
        let segments = raw
            .split('/')
            .map(|segment| match segment.strip_prefix(PARAM_SIGIL) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();
        Self { raw, segments }
    }

    /// The pattern as it was registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match `path` against this pattern, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        if path.split('/').count() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, actual) in self.segments.iter().zip(path.split('/')) {
            match segment {
                Segment::Param(name) => params.insert(name.as_str(), actual),
                Segment::Literal(expected) if expected == actual => {}
                Segment::Literal(_) => return None,
            }
        }
        Some(params)
    }
}

/// Match a raw pattern against a path without keeping the compiled form.
pub fn match_path(pattern: &str, path: &str) -> Option<Params> {
    PathPattern::parse(pattern).matches(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        assert_eq!(match_path("/hello", "/hello"), Some(Params::new()));
        assert!(match_path("/hello", "/Hello").is_none());
        assert!(match_path("/hello", "/world").is_none());
    }

    #[test]
    fn test_param_binding() {
        let params = match_path("/users/:id", "/users/123").unwrap();
        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.len(), 1);

        let params = match_path("/books/:bookId/pages/:page", "/books/7/pages/12").unwrap();
        assert_eq!(params.get("bookId"), Some("7"));
        assert_eq!(params.get("page"), Some("12"));
        assert!(!params.contains("id"));
    }

    #[test]
    fn test_segment_count_mismatch() {
        assert!(match_path("/users/:id", "/users").is_none());
        assert!(match_path("/users/:id", "/users/1/2").is_none());
        assert!(match_path("/hello", "/hello/").is_none());
        assert!(match_path("/books/", "/books").is_none());
    }

    #[test]
    fn test_param_binds_empty_segment() {
        let params = match_path("/users/:id", "/users/").unwrap();
        assert_eq!(params.get("id"), Some(""));
    }

    #[test]
    fn test_captured_value_is_raw() {
        let params = match_path("/files/:name", "/files/a%20b").unwrap();
        assert_eq!(params.get("name"), Some("a%20b"));
    }

    #[test]
    fn test_literal_mismatch_after_param() {
        assert!(match_path("/users/:id/edit", "/users/1/view").is_none());
    }

    #[test]
    fn test_repeated_param_keeps_last_value() {
        let params = match_path("/:x/:x", "/a/b").unwrap();
        assert_eq!(params.get("x"), Some("b"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_param_names() {
        let pattern = PathPattern::parse("/books/:bookId/pages/:page");
        let names: Vec<_> = pattern.param_names().collect();
        assert_eq!(names, vec!["bookId", "page"]);
        assert_eq!(pattern.as_str(), "/books/:bookId/pages/:page");
    }

    #[test]
    fn test_bindings_cover_exactly_the_declared_params() {
        let pattern = PathPattern::parse("/a/:one/b/:two");
        let params = pattern.matches("/a/1/b/2").unwrap();
        let mut keys: Vec<_> = params.iter().map(|(k, _)| k.to_string()).collect();
        keys.sort();
        assert_eq!(keys, vec!["one", "two"]);
    }
}
