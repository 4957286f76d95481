//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router that hands every request to the [`App`]
//! - Buffer request bodies up to the configured limit
//! - Percent-decode the request path before routing
//! - Wire up middleware (tracing, request ID, timeout, panic recovery)
//! - Serve on a listener until shutdown is signalled
//!
//! # Design Decisions
//! - A single fallback handler: all routing decisions belong to the App
//! - Panics in handlers or middleware become 500 responses here, not in
//!   the dispatcher
//! - Dispatch is synchronous and runs on the request's task

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::App;
use crate::config::ServerConfig;
use crate::http::request::{DecodedPath, MakeRequestUuidV4, RequestIdExt};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<App>,
    pub max_body_size: usize,
}

/// HTTP server fronting an [`App`].
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, app: App) -> Self {
        let state = AppState {
            app: Arc::new(app),
            max_body_size: config.limits.max_body_size,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http())
    }

    /// A handle to the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Buffers the body, decodes the path and hands the request to the App.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request.request_id().unwrap_or("unknown").to_string();
    let (mut parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                limit = state.max_body_size,
                error = %e,
                "Failed to buffer request body"
            );
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let decoded = DecodedPath::from_raw(parts.uri.path());
    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %decoded.as_str(),
        "Dispatching request"
    );
    parts.extensions.insert(decoded);

    state.app.dispatch(Request::from_parts(parts, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::context::Context;
    use crate::http::request::X_REQUEST_ID;
    use tower::ServiceExt;

    fn server(app: App) -> HttpServer {
        let mut config = ServerConfig::default();
        config.limits.max_body_size = 16;
        HttpServer::new(config, app)
    }

    #[tokio::test]
    async fn test_body_reaches_handler() {
        let app = App::builder()
            .post("/echo", |c: &mut Context| {
                let body = String::from_utf8_lossy(c.body()).into_owned();
                c.string(StatusCode::OK, body);
            })
            .build();

        let response = server(app)
            .router()
            .oneshot(Request::post("/echo").body(Body::from("ping")).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ping");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let app = App::builder().post("/echo", |_: &mut Context| {}).build();

        let response = server(app)
            .router()
            .oneshot(Request::post("/echo").body(Body::from("x".repeat(64))).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_500() {
        let app = App::builder()
            .get("/boom", |_: &mut Context| {
                panic!("handler failure");
            })
            .build();

        let response = server(app)
            .router()
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_request_id_generated_and_propagated() {
        let app = App::builder().build();
        let router = server(app).router();

        let response = router
            .clone()
            .oneshot(Request::get("/anything").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(X_REQUEST_ID));

        let response = router
            .oneshot(
                Request::get("/anything")
                    .header(X_REQUEST_ID, "client-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "client-id");
    }

    #[tokio::test]
    async fn test_path_is_percent_decoded_before_routing() {
        let app = App::builder()
            .get("/café", |c: &mut Context| c.string(StatusCode::OK, "coffee"))
            .get("/users/:id", |c: &mut Context| {
                let id = c.param("id").unwrap_or_default().to_string();
                c.string(StatusCode::OK, id);
            })
            .build();
        let router = server(app).router();

        let response = router
            .clone()
            .oneshot(Request::get("/caf%C3%A9").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"coffee");

        let response = router
            .oneshot(Request::get("/users/john%20doe").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"john doe");
    }
}
