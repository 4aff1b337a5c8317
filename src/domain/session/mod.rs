//! Session domain module
//!
//! The route table that backs the per-request session gate.

mod routes;

pub use routes::{RouteAccess, RouteRule, RouteTable};
