//! Request identification and routing path.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every inbound request
//! - Expose the ID to handlers and log statements
//! - Carry the percent-decoded path that routing matches against
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An `x-request-id` supplied by the client is kept as-is
//! - The URI itself stays encoded; the decoded path rides in an extension
//! - Decoded bytes that are not UTF-8 become U+FFFD

use axum::http::{HeaderValue, Request};
use percent_encoding::percent_decode_str;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs for `tower_http::request_id` layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read access to the request ID header.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }
}

/// Percent-decoded request path, inserted by the serving layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath(pub String);

impl DecodedPath {
    pub fn from_raw(raw: &str) -> Self {
        Self(percent_decode_str(raw).decode_utf8_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The path routing matches against.
pub trait RoutingPathExt {
    /// The [`DecodedPath`] extension if present, otherwise the raw URI path.
    fn routing_path(&self) -> &str;
}

impl<B> RoutingPathExt for Request<B> {
    fn routing_path(&self) -> &str {
        match self.extensions().get::<DecodedPath>() {
            Some(decoded) => decoded.as_str(),
            None => self.uri().path(),
        }
    }
}
