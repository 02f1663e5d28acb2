//! Core Service Layer
//!
//! Shared infrastructure for the Bloglist server: authentication, data
//! models, configuration, storage and error mapping.

pub mod auth;
pub mod config;
pub mod ctx;
pub mod error;
pub mod extract;
pub mod models;
pub mod router;
pub mod store;

// Re-exports for convenience
pub use config::{AppState, ServerConfig};
pub use ctx::Ctx;
pub use error::{Error, Result};
pub use extract::ApiJson;
pub use router::router;
