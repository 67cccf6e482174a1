//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (exact lookup in the table)
//!     → Return: Matched(RouteSpec) | MethodNotAllowed(RouteSpec) | NotFound
//!
//! Route table (table.rs):
//!     name, method, path, auth requirement, target
//!     built once at startup, shared via Arc
//! ```
//!
//! # Design Decisions
//! - The contract lives in one table; every host adapter serves the same routes
//! - Deterministic: same input always matches same route
//! - Lookup never touches the network

pub mod router;
pub mod table;

pub use router::{Lookup, RouteTable};
pub use table::{RouteSpec, Target};
