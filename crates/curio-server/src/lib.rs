//! # curio-server
//!
//! HTTP server binary for the Curio catalog: configuration loading,
//! component wiring, the axum router, and process lifecycle.

pub mod bootstrap;
pub mod config;
pub mod handlers;
pub mod observability;
pub mod server;

pub use config::{AppConfig, BootstrapConfig, CacheConfig, RedisConfig, ServerConfig};
pub use observability::{init_tracing, shutdown_tracing};
pub use server::{AppState, CurioServer, ServerBuilder, build_app, create_cache_backend};
