//! CollabUp Server Library
//!
//! HTTP surface of the recommendation engine. Exposed as a library so the
//! router can be driven in-process by tests.

pub mod config;
pub mod http;

pub use config::{ConfigError, ServerConfig};
pub use http::{build_router, serve, state::AppState, ServeError};
