//! Per-request context handed to middleware and handlers.
//!
//! # Responsibilities
//! - Carry the inbound request (headers and buffered body)
//! - Carry the path parameters bound by the route match
//! - Collect the outbound response through [`ResponseWriter`]
//!
//! # Design Decisions
//! - The status code is committed by the first `write_header` or body write;
//!   later status changes are ignored
//! - Header changes after the status is committed are ignored
//! - Body writes append; nothing is flushed until the request finishes
//! - A context lives for exactly one request and is never shared

use axum::body::{Body, Bytes};
use axum::http::header::{self, HeaderMap, HeaderValue, IntoHeaderName};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use serde::Serialize;

use crate::http::request::RoutingPathExt;
use crate::routing::matcher::Params;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

/// Response sink for a single request.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit the status code. Only the first call has an effect.
    pub fn write_header(&mut self, status: StatusCode) {
        match self.status {
            Some(current) => {
                tracing::debug!(
                    current = %current,
                    ignored = %status,
                    "Superfluous write_header call"
                );
            }
            None => self.status = Some(status),
        }
    }

    /// Append bytes to the body, committing status 200 if none was set.
    pub fn write(&mut self, bytes: &[u8]) {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes);
    }

    /// Set a header. Has no effect once the status is committed.
    pub fn set_header<K: IntoHeaderName>(&mut self, name: K, value: HeaderValue) {
        if self.is_committed() {
            tracing::debug!("Header set after status was committed, ignoring");
            return;
        }
        self.headers.insert(name, value);
    }

    /// Mutable header access, available until the status is committed.
    pub fn headers_mut(&mut self) -> Option<&mut HeaderMap> {
        if self.is_committed() {
            None
        } else {
            Some(&mut self.headers)
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

/// Request, response sink and path parameters for one request.
#[derive(Debug)]
pub struct Context {
    request: Request<Bytes>,
    response: ResponseWriter,
    params: Params,
}

impl Context {
    pub fn new(request: Request<Bytes>, params: Params) -> Self {
        Self {
            request,
            response: ResponseWriter::new(),
            params,
        }
    }

    pub fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    pub fn response(&self) -> &ResponseWriter {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut ResponseWriter {
        &mut self.response
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// The path routing matched against, percent-decoded when served over HTTP.
    pub fn path(&self) -> &str {
        self.request.routing_path()
    }

    /// Request header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        self.request.body()
    }

    /// Path parameter bound by the matched route, e.g. `id` for `/users/:id`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Write a plain-text response.
    pub fn string(&mut self, status: StatusCode, body: impl AsRef<str>) {
        self.default_content_type(TEXT_PLAIN);
        self.response.write_header(status);
        self.response.write(body.as_ref().as_bytes());
    }

    /// Serialize `data` as a JSON response.
    pub fn json<T: Serialize + ?Sized>(&mut self, status: StatusCode, data: &T) {
        let mut encoded = match serde_json::to_vec(data) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, path = %self.path(), "Failed to serialize JSON response");
                self.string(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
                return;
            }
        };
        encoded.push(b'\n');

        self.response
            .set_header(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        self.response.write_header(status);
        self.response.write(&encoded);
    }

    pub fn into_response(self) -> Response {
        self.response.into_response()
    }

    fn default_content_type(&mut self, value: &'static str) {
        if let Some(headers) = self.response.headers_mut() {
            if !headers.contains_key(header::CONTENT_TYPE) {
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn for_test(method: Method, path: &str, params: Params) -> Self {
        let mut request = Request::new(Bytes::new());
        *request.method_mut() = method;
        if let Ok(uri) = path.parse() {
            *request.uri_mut() = uri;
        }
        Self::new(request, params)
    }
}
