//! Static file server for the shoe AR viewer
//!
//! Serves the project root over HTTP for local and on-device testing:
//! - Every response carries permissive CORS headers, errors included
//! - `.usdz` paths always report `model/vnd.usdz+zip`, even on 404
//! - `OPTIONS` preflights are answered with `204 No Content`
//! - Everything else is plain static-file resolution

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use shoe_ar_core::USDZ_CONTENT_TYPE;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "*";

/// Where and what to serve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// Directory served as `/`
    pub root: PathBuf,
    pub host: String,
    pub port: u16,
}

impl ServerOptions {
    /// Address to bind, e.g. `0.0.0.0:8000`
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Force the USDZ content type on any response for a `.usdz` path
async fn usdz_content_type(request: Request, next: Next) -> Response {
    let is_usdz = request.uri().path().ends_with(".usdz");
    let mut response = next.run(request).await;
    if is_usdz {
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(USDZ_CONTENT_TYPE),
        );
    }
    response
}

async fn answer_preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}

/// Build the router serving `root`
pub fn build_router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(middleware::from_fn(answer_preflight))
        .layer(middleware::from_fn(usdz_content_type))
        // Outermost so the headers land on every response, including
        // preflights and errors produced by the layers above
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Bind the listening socket. No retry on failure.
///
/// # Errors
/// Returns the bind error, e.g. when the port is already in use.
pub async fn bind(options: &ServerOptions) -> Result<TcpListener, std::io::Error> {
    let listener = TcpListener::bind(options.bind_addr()).await?;
    tracing::info!(
        "Serving {} on {}",
        options.root.display(),
        listener.local_addr()?
    );
    Ok(listener)
}

/// Serve `root` on an already bound listener until `shutdown` resolves
///
/// # Errors
/// Returns an IO error if accepting connections fails.
pub async fn serve<F>(listener: TcpListener, root: &Path, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(root);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolve on Ctrl+C (and SIGTERM on unix)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
