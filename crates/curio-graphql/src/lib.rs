//! # curio-graphql
//!
//! GraphQL API layer for the Curio catalog server.
//!
//! This crate is the thin collaborator over the core crates: the schema
//! parses and validates requests, builds a per-request [`RequestContext`],
//! and delegates to `curio-auth` for identity mutations and `curio-cache`
//! for item queries.
//!
//! ## Surface
//!
//! - `Query.me` - the account behind the presented bearer token
//! - `Query.item(id)` - cache-accelerated point lookup, null when absent
//! - `Query.items` - full listing, cache bypassed
//! - `Mutation.signUp(username, email, password)` - returns a token string
//! - `Mutation.login(email, password)` - returns a token string
//!
//! ## Endpoints
//!
//! - `POST /graphql` - execute queries and mutations
//! - `GET /graphql` - interactive playground
//!
//! ## Modules
//!
//! - [`context`] - Per-request execution context
//! - [`schema`] - Query and Mutation roots
//! - [`types`] - GraphQL object types
//! - [`handler`] - Axum HTTP handlers
//! - [`error`] - Core-error to GraphQL-error mapping

pub mod context;
pub mod error;
pub mod handler;
pub mod schema;
pub mod types;

pub use context::{ContextBuildError, RequestContext, RequestContextBuilder};
pub use handler::{GraphQLState, graphql_handler, graphql_playground};
pub use schema::{CatalogSchema, MutationRoot, QueryRoot, build_schema};
pub use types::{Account, CatalogItem};
