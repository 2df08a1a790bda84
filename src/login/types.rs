//! Wire shapes of the external `/auth/login` endpoint.
//!
//! The endpoint is served elsewhere; these types only describe what the
//! diagnostics send and expect back.

use serde::{Deserialize, Serialize};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Authenticated user as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usuario {
    /// Display name.
    pub nombre: String,
    /// Account email.
    pub email: String,
    /// Role name.
    pub rol: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Authenticated user.
    pub usuario: Usuario,
    /// Session token.
    pub token: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Error message.
    pub error: String,
}

/// A fixed credential pair used by the diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    /// Account email.
    pub email: &'static str,
    /// Plain-text password.
    pub password: &'static str,
}

impl Credentials {
    /// Request body for these credentials.
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.to_string(),
            password: self.password.to_string(),
        }
    }
}

/// Administrator account; also the one used by the network probe.
pub const ADMIN_CREDENTIALS: Credentials = Credentials {
    email: "admin@sistema.com",
    password: "admin123",
};

/// Regular user account.
pub const USER_CREDENTIALS: Credentials = Credentials {
    email: "usuario@sistema.com",
    password: "usuario123",
};

/// Credential pairs exercised by the smoke test, in order.
pub const SMOKE_TEST_CREDENTIALS: [Credentials; 2] = [ADMIN_CREDENTIALS, USER_CREDENTIALS];
