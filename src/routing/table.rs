//! The relay's route contract, declared once.

use axum::http::Method;

use crate::routing::router::RouteTable;

/// Upstream endpoint every generation route forwards to.
pub const RESPONSES_PATH: &str = "/v1/responses";
pub const MODELS_PATH: &str = "/v1/models";

/// What a matched route does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Static `{"ok":true}` liveness payload.
    Health,
    /// Forward to the upstream API.
    Upstream { method: Method, path: &'static str },
    /// Validate a part-request form and email it.
    PartRequest,
}

/// One row of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// Route identifier for logging/metrics.
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    /// Whether the `X-Proxy-Key` check applies.
    pub requires_key: bool,
    pub target: Target,
}

impl RouteSpec {
    fn forward(name: &'static str, method: Method, path: &'static str, upstream: &'static str) -> Self {
        Self {
            name,
            method: method.clone(),
            path,
            requires_key: true,
            target: Target::Upstream {
                method,
                path: upstream,
            },
        }
    }
}

impl RouteTable {
    /// The miniPCB relay routes.
    pub fn standard() -> Self {
        let mut routes = vec![
            RouteSpec {
                name: "health",
                method: Method::GET,
                path: "/api/health",
                requires_key: false,
                target: Target::Health,
            },
            RouteSpec::forward("models", Method::GET, "/api/models", MODELS_PATH),
        ];

        for (name, path) in [
            ("review", "/api/review"),
            ("suggest", "/api/suggest"),
            ("chat", "/api/chat"),
            ("create", "/api/create"),
        ] {
            routes.push(RouteSpec::forward(name, Method::POST, path, RESPONSES_PATH));
        }

        routes.push(RouteSpec {
            name: "part-request",
            method: Method::POST,
            path: "/api/part-request",
            requires_key: true,
            target: Target::PartRequest,
        });

        Self::new(routes)
    }
}
