//! GraphQL executor module
//!
//! - `core`: parses a document and drives its root fields
//! - `field_resolver`: resolves one root field, isolating its errors
//! - `projection`: checks sub-selections and shapes resolved values
//! - `resolvers`: the functions bound to the root fields

mod core;
pub mod field_resolver;
pub mod projection;
pub mod resolvers;

pub use self::core::{ExecutionResult, GraphQLExecutor, Request};
