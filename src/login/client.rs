//! Single login attempt against an `/auth/login` endpoint.

use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::types::{Credentials, ErrorBody, LoginResponse};

/// Result of one login attempt. Never an error: every failure is a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// 2xx with a JSON body.
    Success {
        /// HTTP status code.
        status: u16,
        /// Full response payload.
        payload: Value,
    },
    /// Non-2xx response.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// `error` field of the body, or the raw body when absent.
        message: String,
    },
    /// Transport failure or undecodable 2xx body.
    Failed {
        /// Error description.
        reason: String,
    },
}

impl LoginOutcome {
    /// Typed session when the payload has the expected `usuario`/`token` shape.
    pub fn session(&self) -> Option<LoginResponse> {
        match self {
            Self::Success { payload, .. } => serde_json::from_value(payload.clone()).ok(),
            _ => None,
        }
    }

    /// Whether the attempt produced a usable session.
    pub fn is_success(&self) -> bool {
        self.session().is_some()
    }
}

/// Extract a human-readable message from an error response body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => err.error,
        Err(_) if body.trim().is_empty() => "(sin cuerpo)".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// POST `credentials` as JSON to `url`.
#[instrument(skip(http, url, credentials), fields(url = %url, email = credentials.email))]
pub async fn attempt_login(
    http: &reqwest::Client,
    url: &Url,
    credentials: &Credentials,
) -> LoginOutcome {
    let response = match http
        .post(url.clone())
        .json(&credentials.to_request())
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            debug!("Login request failed: {}", e);
            return LoginOutcome::Failed {
                reason: describe_transport_error(&e),
            };
        }
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(b) => b,
        Err(e) => {
            return LoginOutcome::Failed {
                reason: describe_transport_error(&e),
            }
        }
    };

    if !status.is_success() {
        debug!(status = status.as_u16(), "Login rejected");
        return LoginOutcome::Rejected {
            status: status.as_u16(),
            message: error_message(&body),
        };
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(payload) => LoginOutcome::Success {
            status: status.as_u16(),
            payload,
        },
        Err(e) => LoginOutcome::Failed {
            reason: format!("respuesta no es JSON válido: {}", e),
        },
    }
}

/// Short description of a reqwest failure.
pub fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "tiempo de espera agotado".to_string()
    } else if e.is_connect() {
        format!("no se pudo conectar: {}", e)
    } else {
        e.to_string()
    }
}
