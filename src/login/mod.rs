//! Login smoke test against an external `/auth/login` endpoint.

pub mod client;
pub mod smoke;
pub mod types;

pub use client::{attempt_login, LoginOutcome};
pub use smoke::{render_attempt, LoginAttempt, LoginSmokeTest};
pub use types::{Credentials, LoginRequest, LoginResponse, Usuario};
