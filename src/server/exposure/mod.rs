//! API exposure modules
//!
//! Each exposure type consumes a `ServerHost` and produces a Router for that
//! protocol.

pub mod graphql;
pub mod rest;

pub use graphql::GraphQLExposure;
pub use rest::RestExposure;
