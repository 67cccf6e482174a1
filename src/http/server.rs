//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Build the shared state (route table, HTTP client, secrets) once
//! - Wire up middleware (request ID, tracing, CORS)
//! - Dispatch each request through the route table
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::http::request::{read_body, request_id, MakeRelayRequestId};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::part_request::{self, Mailer, PartRequestError};
use crate::proxy::UpstreamClient;
use crate::routing::{Lookup, RouteSpec, RouteTable, Target};
use crate::security::{cors, ProxyKey};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub auth: ProxyKey,
    pub upstream: UpstreamClient,
    pub mailer: Mailer,
    pub max_body_size: usize,
}

impl AppState {
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("minipcb-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            routes: Arc::new(RouteTable::standard()),
            auth: ProxyKey::new(config.auth.proxy_key.clone()),
            upstream: UpstreamClient::new(http.clone(), &config.upstream),
            mailer: Mailer::new(http, &config.mail),
            max_body_size: config.limits.max_body_size,
        })
    }
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::from_config(config)?;

        if !state.upstream.has_credential() {
            tracing::warn!("OPENAI_API_KEY is not set; forwarding routes will answer 500");
        }
        if !state.auth.is_enabled() {
            tracing::warn!("PROXY_KEY is not set; protected routes accept any caller");
        }
        if !state.mailer.is_configured() {
            tracing::warn!("Mail settings incomplete; part requests will fail");
        }

        Ok(Self {
            router: build_router(state),
        })
    }

    /// The relay as a `tower::Service`, for tests and other hosts.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let [allow_origin, allow_methods, allow_headers] = cors::header_layers();

    Router::new()
        .route("/", any(relay_handler))
        .route("/{*path}", any(relay_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRelayRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(allow_origin)
                .layer(allow_methods)
                .layer(allow_headers)
                .layer(middleware::from_fn(cors::preflight)),
        )
}

/// Looks up the route and runs its target.
async fn relay_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let request_id = request_id(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let route = match state.routes.lookup(&method, &path) {
        Lookup::Matched(route) => route,
        Lookup::MethodNotAllowed(route) => {
            tracing::debug!(request_id = %request_id, method = %method, path = %path, "Method not allowed");
            let response = match route.target {
                Target::PartRequest => PartRequestError::MethodNotAllowed.into_response(),
                _ => RelayError::MethodNotAllowed.into_response(),
            };
            return finish(route.name, response, start);
        }
        Lookup::NotFound => {
            tracing::debug!(request_id = %request_id, method = %method, path = %path, "No route matched");
            return finish("none", RelayError::NotFound.into_response(), start);
        }
    };

    tracing::debug!(request_id = %request_id, route = route.name, "Dispatching");

    let response = match dispatch(&state, route, request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };

    tracing::info!(
        request_id = %request_id,
        route = route.name,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request complete"
    );
    finish(route.name, response, start)
}

async fn dispatch(
    state: &AppState,
    route: &RouteSpec,
    request: Request,
) -> Result<Response, RelayError> {
    if route.requires_key {
        state.auth.verify(request.headers())?;
    }

    match &route.target {
        Target::Health => Ok(Json(json!({ "ok": true })).into_response()),
        Target::Upstream { method, path } => {
            let body = if *method == Method::GET {
                None
            } else {
                read_body(request, state.max_body_size).await?
            };
            let upstream = state.upstream.forward(method.clone(), path, body).await?;
            Ok(upstream.into_response())
        }
        Target::PartRequest => {
            let body = read_body(request, state.max_body_size).await?;
            Ok(part_request::submit(&state.mailer, body.as_deref().unwrap_or_default())
                .await
                .into_response())
        }
    }
}

fn finish(route: &str, response: Response, start: Instant) -> Response {
    metrics::record_request(route, response.status().as_u16(), start);
    response
}
