//! Route lookup.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exact, case-sensitive path match; O(n) scan over a handful of routes
//! - Explicit NotFound / MethodNotAllowed rather than a silent default

use axum::http::Method;

use crate::routing::table::RouteSpec;

/// Result of looking up a request against the route table.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    Matched(&'a RouteSpec),
    /// The path exists but not for this method; carries the route that owns it.
    MethodNotAllowed(&'a RouteSpec),
    NotFound,
}

/// The compiled route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteSpec>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteSpec>) -> Self {
        Self { routes }
    }

    pub fn lookup(&self, method: &Method, path: &str) -> Lookup<'_> {
        let mut owner = None;
        for route in self.routes.iter().filter(|r| r.path == path) {
            if route.method == *method {
                return Lookup::Matched(route);
            }
            owner = owner.or(Some(route));
        }

        match owner {
            Some(route) => Lookup::MethodNotAllowed(route),
            None => Lookup::NotFound,
        }
    }

    pub fn routes(&self) -> &[RouteSpec] {
        &self.routes
    }
}
