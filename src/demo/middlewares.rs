//! Demo middleware.

use axum::http::StatusCode;
use onion_router::Context;

/// Rejects requests without an `X-Auth` header.
///
/// The chain has no early exit, so the route handler still runs; the 401
/// status sticks because it is committed first.
pub fn auth(c: &mut Context) {
    if c.header("x-auth").map_or(true, str::is_empty) {
        c.string(StatusCode::UNAUTHORIZED, "Unauthorized!");
    }
}

pub fn log(c: &mut Context) {
    tracing::info!(method = %c.method(), path = %c.path(), "Request");
}
