//! Handler abstraction shared by routes, middleware and the not-found fallback.

use std::sync::Arc;

use crate::http::context::Context;

/// Something that can serve a request by writing to its [`Context`].
///
/// Implemented for every `Fn(&mut Context) + Send + Sync + 'static`, so plain
/// functions and closures can be registered directly. Closures need their
/// argument annotated (`|c: &mut Context| ...`).
pub trait Handler: Send + Sync + 'static {
    fn call(&self, ctx: &mut Context);
}

impl<F> Handler for F
where
    F: Fn(&mut Context) + Send + Sync + 'static,
{
    fn call(&self, ctx: &mut Context) {
        self(ctx)
    }
}

/// Shared, type-erased handler.
pub type BoxedHandler = Arc<dyn Handler>;

pub fn boxed<H: Handler>(handler: H) -> BoxedHandler {
    Arc::new(handler)
}
