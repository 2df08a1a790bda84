//! Login smoke test: POST each fixed credential pair and print the outcome.

use std::time::Duration;

use tracing::info;
use url::Url;

use super::client::{attempt_login, LoginOutcome};
use super::types::{Credentials, SMOKE_TEST_CREDENTIALS};
use crate::error::Result;
use crate::metrics;

/// One credential pair and what the endpoint answered.
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    /// Credentials that were sent.
    pub credentials: Credentials,
    /// What came back.
    pub outcome: LoginOutcome,
}

/// Smoke-test runner.
#[derive(Debug, Clone)]
pub struct LoginSmokeTest {
    http: reqwest::Client,
    url: Url,
}

impl LoginSmokeTest {
    /// Create a runner targeting `url`.
    pub fn new(url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url: Url::parse(url)?,
        })
    }

    /// Target login URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Attempt every credential pair sequentially.
    pub async fn run(&self, credentials: &[Credentials]) -> Vec<LoginAttempt> {
        let mut attempts = Vec::with_capacity(credentials.len());

        for creds in credentials {
            info!(email = creds.email, "Attempting login");
            let outcome = attempt_login(&self.http, &self.url, creds).await;
            metrics::inc_login_attempts(outcome.is_success());
            attempts.push(LoginAttempt {
                credentials: *creds,
                outcome,
            });
        }

        attempts
    }

    /// Run with the built-in credential pairs.
    pub async fn run_default(&self) -> Vec<LoginAttempt> {
        self.run(&SMOKE_TEST_CREDENTIALS).await
    }
}

/// Render one attempt as the lines printed to the console.
pub fn render_attempt(attempt: &LoginAttempt) -> Vec<String> {
    let mut lines = vec![format!("Probando login con {}", attempt.credentials.email)];

    match &attempt.outcome {
        LoginOutcome::Success { status, payload } => {
            lines.push(format!("  Login exitoso ({})", status));
            let pretty =
                serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
            lines.extend(pretty.lines().map(|l| format!("  {}", l)));
        }
        LoginOutcome::Rejected { status, message } => {
            lines.push(format!("  Error HTTP {}: {}", status, message));
        }
        LoginOutcome::Failed { reason } => {
            lines.push(format!("  Error: {}", reason));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::login::types::ADMIN_CREDENTIALS;
    use serde_json::json;

    #[test]
    fn new_rejects_invalid_url() {
        assert!(LoginSmokeTest::new("::not a url").is_err());
    }

    #[test]
    fn render_success_prints_payload() {
        let attempt = LoginAttempt {
            credentials: ADMIN_CREDENTIALS,
            outcome: LoginOutcome::Success {
                status: 200,
                payload: json!({ "token": "abc" }),
            },
        };

        let lines = render_attempt(&attempt);
        assert_eq!(lines[0], "Probando login con admin@sistema.com");
        assert!(lines.iter().any(|l| l.contains("\"token\": \"abc\"")));
    }

    #[test]
    fn render_rejected_prints_status_and_message() {
        let attempt = LoginAttempt {
            credentials: ADMIN_CREDENTIALS,
            outcome: LoginOutcome::Rejected {
                status: 401,
                message: "Credenciales inválidas".to_string(),
            },
        };

        let lines = render_attempt(&attempt);
        assert_eq!(lines[1], "  Error HTTP 401: Credenciales inválidas");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_reported_not_raised() {
        // Port 9 (discard) on loopback is not expected to be listening.
        let runner = LoginSmokeTest::new("http://127.0.0.1:9/auth/login").unwrap();
        let attempts = runner.run(&[ADMIN_CREDENTIALS]).await;

        assert_eq!(attempts.len(), 1);
        assert!(matches!(attempts[0].outcome, LoginOutcome::Failed { .. }));
    }
}
