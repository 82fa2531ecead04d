//! HTTP server setup and the discovery handler.
//!
//! # Responsibilities
//! - Create the Axum router and middleware (timeout, request ID, tracing)
//! - Resolve each request against the currently published route table
//! - Answer fetch-tool queries with the import page
//! - Send browsers to the documentation site
//! - Graceful shutdown through the lifecycle coordinator

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::{request, response};
use crate::lifecycle::{ConfigSupervisor, Shutdown};
use crate::observability::metrics::{self, Outcome};
use crate::routing::resolve;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub supervisor: Arc<ConfigSupervisor>,
    /// Redirect base for non-discovery requests, without trailing slash.
    pub docs_url: Arc<str>,
}

/// HTTP server for discovery requests.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(supervisor: Arc<ConfigSupervisor>, config: &ServerConfig) -> Self {
        let state = AppState {
            supervisor,
            docs_url: config.redirect.docs_url.trim_end_matches('/').into(),
        };
        let timeout = Duration::from_secs(config.listener.request_timeout_secs);

        Self {
            router: Self::build_router(state, timeout),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, timeout: Duration) -> Router {
        Router::new()
            .route("/", any(vanity_handler))
            .route("/{*path}", any(vanity_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(timeout))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The configured router, for serving elsewhere or driving in tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the path, then either render the import page or redirect.
async fn vanity_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let start = Instant::now();

    if method != Method::GET && method != Method::HEAD {
        metrics::record_request(Outcome::MethodNotAllowed, start);
        return (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    }

    let path = uri.path();
    let table = state.supervisor.current();

    let matched = match resolve(&table, path) {
        Ok(m) => m,
        Err(_) => {
            tracing::debug!(path = %path, "No route matched");
            metrics::record_request(Outcome::NotFound, start);
            return (StatusCode::NOT_FOUND, "Not Found").into_response();
        }
    };

    let host = request::request_host(&headers, &uri);

    if !request::is_discovery(&uri) {
        let target = format!("{}/{}{}", state.docs_url, host, path);
        tracing::debug!(path = %path, target = %target, "Redirecting to docs");
        metrics::record_request(Outcome::Redirect, start);
        return Redirect::to(&target).into_response();
    }

    tracing::debug!(
        path = %path,
        root = %matched.root,
        vcs = %matched.source.vcs,
        "Serving import page"
    );
    let page = response::import_page(host, &matched);
    metrics::record_request(Outcome::Import, start);
    Html(page).into_response()
}
