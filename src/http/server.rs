//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a single dispatching fallback
//! - Wire up middleware (tracing, request ID, CORS)
//! - Dispatch requests to preflight, proxy, not-found or static files
//! - Bind server to listener and stop on shutdown

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::{CredentialSource, ServerConfig};
use crate::http::cors;
use crate::http::proxy;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::http::response::empty_response;
use crate::lifecycle::signals::shutdown_signal;
use crate::routing::{Route, Router as RouteTable};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub upstream: UpstreamClient,
    pub credentials: CredentialSource,
    /// Variable name reported when the credential is missing.
    pub credential_env: Arc<str>,
    /// Body cap; `None` reads the whole body.
    pub max_body_bytes: Option<usize>,
    pub static_files: ServeDir,
}

/// HTTP server for the dev server.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// `credentials` is resolved on every proxied request.
    pub fn new(config: ServerConfig, credentials: CredentialSource) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;

        let static_files = ServeDir::new(&config.static_files.root)
            .append_index_html_on_directories(config.static_files.index);

        let state = AppState {
            routes: Arc::new(RouteTable::new(config.proxy.path.clone())),
            upstream,
            credentials,
            credential_env: Arc::from(config.upstream.credential_env.as_str()),
            max_body_bytes: config.proxy.max_body_bytes,
            static_files,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(cors::ALLOW_ORIGIN),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(cors::ALLOW_METHODS),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(cors::ALLOW_HEADERS),
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C, SIGTERM or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_root = %self.config.static_files.root.display(),
            proxy_path = %self.config.proxy.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every request.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let route = state
        .routes
        .resolve(request.method(), request.uri().path());

    tracing::debug!(route = ?route, "Dispatching request");

    match route {
        Route::Preflight => empty_response(StatusCode::NO_CONTENT),
        Route::Proxy => proxy::forward(&state, request).await,
        Route::NotFound => empty_response(StatusCode::NOT_FOUND),
        Route::Static => match state.static_files.clone().oneshot(request).await {
            Ok(response) => response.map(Body::new).into_response(),
            Err(never) => match never {},
        },
    }
}
