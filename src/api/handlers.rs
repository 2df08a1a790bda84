//! HTTP API handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Message returned by the root endpoint.
pub const ROOT_MESSAGE: &str = "API funcionando correctamente";

/// Status constant carried by every response.
pub const STATUS_OK: &str = "OK";

/// Root endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootResponse {
    /// Human-readable greeting.
    pub message: String,
    /// Current UTC time, ISO-8601.
    pub timestamp: String,
    /// Status: "OK".
    pub status: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Status: "OK".
    pub status: String,
    /// Current UTC time, ISO-8601.
    pub timestamp: String,
}

/// Current UTC time with millisecond precision and a `Z` suffix.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Root handler - always returns 200.
#[instrument]
pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(RootResponse {
            message: ROOT_MESSAGE.to_string(),
            timestamp: now_iso8601(),
            status: STATUS_OK.to_string(),
        }),
    )
}

/// Health check handler - always returns 200.
#[instrument]
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: STATUS_OK.to_string(),
            timestamp: now_iso8601(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn timestamp_is_rfc3339_utc() {
        let ts = now_iso8601();
        assert!(ts.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn timestamp_has_millisecond_precision() {
        let ts = now_iso8601();
        // 2026-10-19T12:00:00.000Z
        assert_eq!(ts.len(), 24);
        assert_eq!(&ts[19..20], ".");
    }
}
