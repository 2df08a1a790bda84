//! HTTP API module for the status and health endpoints.

pub mod handlers;
pub mod routes;
pub mod server;

pub use handlers::{HealthResponse, RootResponse};
pub use routes::create_router;
pub use server::serve;
