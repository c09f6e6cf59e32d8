//! Server module for building the HTTP server
//!
//! `ServerBuilder` assembles a `ServerHost` and exposes it through:
//! - REST CRUD routes under `/items` and `/item/{id}`
//! - the GraphQL endpoint under `/graphql/item`

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::{GraphQLExposure, RestExposure};
pub use host::ServerHost;
