//! Minimal JSON status service with network diagnostics.
//!
//! The service answers two fixed-shape endpoints:
//!
//! ```text
//! GET /        -> { "message": "API funcionando correctamente",
//!                   "timestamp": "...", "status": "OK" }
//! GET /health  -> { "status": "OK", "timestamp": "..." }
//! ```
//!
//! Two diagnostics ship alongside it. Neither shares state with the server.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP router, handlers and listener
//! - [`probe`]: Reachability probe over local IPv4 addresses
//! - [`login`]: Login smoke test against an external `/auth/login`
//! - [`metrics`]: Request and probe counters
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod login;
pub mod metrics;
pub mod probe;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
