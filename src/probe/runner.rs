//! Per-address reachability and login probing.

use std::net::Ipv4Addr;
use std::time::Duration;

use strum::Display;
use tracing::{info, instrument};
use url::Url;

use crate::error::{ProbeError, Result};
use crate::login::client::{attempt_login, describe_transport_error, LoginOutcome};
use crate::login::types::{Credentials, ADMIN_CREDENTIALS};
use crate::metrics;

/// Path of the login endpoint on the probed service.
pub const LOGIN_PATH: &str = "auth/login";

/// Result of the GET against an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    /// Answered with a 2xx status.
    Reachable {
        /// HTTP status code.
        status: u16,
    },
    /// Answered, but with a non-2xx status.
    ErrorStatus {
        /// HTTP status code.
        status: u16,
    },
    /// No HTTP answer (timeout, refused, unroutable).
    Unreachable {
        /// Error description.
        reason: String,
    },
}

/// Summary classification of a probe, used for metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProbeOutcome {
    /// GET failed or returned non-2xx.
    Unreachable,
    /// GET succeeded and login returned a session.
    LoginSucceeded,
    /// GET succeeded but login did not return a session.
    LoginFailed,
}

/// Everything learned about one address.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// Probed address.
    pub address: Ipv4Addr,
    /// Base URL that was requested.
    pub base_url: String,
    /// GET result.
    pub reachability: Reachability,
    /// Login result, only present when the GET succeeded.
    pub login: Option<LoginOutcome>,
}

impl ProbeReport {
    /// Classify this report.
    pub fn outcome(&self) -> ProbeOutcome {
        match (&self.reachability, &self.login) {
            (Reachability::Reachable { .. }, Some(login)) if login.is_success() => {
                ProbeOutcome::LoginSucceeded
            }
            (Reachability::Reachable { .. }, _) => ProbeOutcome::LoginFailed,
            _ => ProbeOutcome::Unreachable,
        }
    }

    /// Whether the GET succeeded.
    pub fn is_reachable(&self) -> bool {
        matches!(self.reachability, Reachability::Reachable { .. })
    }
}

/// Base URL of the service on `address:port`.
pub fn base_url(address: Ipv4Addr, port: u16) -> std::result::Result<Url, ProbeError> {
    let raw = format!("http://{}:{}/", address, port);
    Url::parse(&raw).map_err(|e| ProbeError::InvalidTarget {
        target: raw,
        reason: e.to_string(),
    })
}

/// Login URL under a base URL.
pub fn login_url(base: &Url) -> std::result::Result<Url, ProbeError> {
    base.join(LOGIN_PATH).map_err(|e| ProbeError::InvalidTarget {
        target: base.to_string(),
        reason: e.to_string(),
    })
}

/// Sequential network probe.
#[derive(Debug, Clone)]
pub struct NetworkProbe {
    http: reqwest::Client,
    port: u16,
    timeout: Duration,
    credentials: Credentials,
}

impl NetworkProbe {
    /// Create a probe for `port` with a fixed per-request timeout.
    pub fn new(port: u16, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            port,
            timeout,
            credentials: ADMIN_CREDENTIALS,
        })
    }

    /// Use different login credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Probed port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET the base URL, then try a login if it answered 2xx.
    #[instrument(skip(self), fields(port = self.port))]
    pub async fn probe_address(&self, address: Ipv4Addr) -> Result<ProbeReport> {
        let base = base_url(address, self.port)?;
        let reachability = self.check_reachable(&base).await;

        let login = if matches!(reachability, Reachability::Reachable { .. }) {
            let url = login_url(&base)?;
            Some(attempt_login(&self.http, &url, &self.credentials).await)
        } else {
            None
        };

        let report = ProbeReport {
            address,
            base_url: base.to_string(),
            reachability,
            login,
        };
        metrics::inc_probe_attempts(report.outcome());
        info!(%address, outcome = %report.outcome(), "Probe finished");

        Ok(report)
    }

    async fn check_reachable(&self, base: &Url) -> Reachability {
        match self.http.get(base.clone()).send().await {
            Ok(resp) if resp.status().is_success() => Reachability::Reachable {
                status: resp.status().as_u16(),
            },
            Ok(resp) => Reachability::ErrorStatus {
                status: resp.status().as_u16(),
            },
            Err(e) => Reachability::Unreachable {
                reason: describe_transport_error(&e),
            },
        }
    }

    /// Probe every address in order. A target that cannot even be built is
    /// reported as unreachable instead of aborting the run.
    pub async fn run(&self, addresses: &[Ipv4Addr]) -> Vec<ProbeReport> {
        let mut reports = Vec::with_capacity(addresses.len());

        for &address in addresses {
            let report = match self.probe_address(address).await {
                Ok(r) => r,
                Err(e) => ProbeReport {
                    address,
                    base_url: format!("http://{}:{}/", address, self.port),
                    reachability: Reachability::Unreachable {
                        reason: e.to_string(),
                    },
                    login: None,
                },
            };
            reports.push(report);
        }

        reports
    }
}

/// Render one report as the lines printed to the console.
pub fn render_report(report: &ProbeReport) -> Vec<String> {
    let mut lines = vec![format!("Probando {}", report.base_url)];

    match &report.reachability {
        Reachability::Reachable { status } => {
            lines.push(format!("  Servidor accesible ({})", status));
        }
        Reachability::ErrorStatus { status } => {
            lines.push(format!("  El servidor respondió con error HTTP {}", status));
        }
        Reachability::Unreachable { reason } => {
            lines.push(format!("  No accesible: {}", reason));
        }
    }

    match &report.login {
        None => {}
        Some(outcome) => match outcome.session() {
            Some(session) => lines.push(format!(
                "  Login exitoso: {} ({})",
                session.usuario.nombre, session.usuario.rol
            )),
            None => match outcome {
                LoginOutcome::Rejected { status, message } => {
                    lines.push(format!("  Login falló: HTTP {} - {}", status, message))
                }
                LoginOutcome::Failed { reason } => {
                    lines.push(format!("  Login falló: {}", reason))
                }
                LoginOutcome::Success { .. } => {
                    lines.push("  Login falló: respuesta inesperada".to_string())
                }
            },
        },
    }

    lines
}

/// Closing instructions, printed regardless of outcome.
pub fn render_instructions(reports: &[ProbeReport], port: u16) -> Vec<String> {
    let reachable: Vec<&ProbeReport> = reports.iter().filter(|r| r.is_reachable()).collect();
    let mut lines = vec!["Instrucciones:".to_string()];

    if reachable.is_empty() {
        lines.push("  Ninguna dirección respondió.".to_string());
    } else {
        lines.push("  Direcciones accesibles:".to_string());
        lines.extend(reachable.iter().map(|r| format!("    {}", r.base_url)));
    }

    lines.push(
        "  1. Usa una dirección accesible como URL base de la API en los otros dispositivos."
            .to_string(),
    );
    lines.push(format!(
        "  2. Verifica que el servidor esté corriendo en el puerto {} y escuche en 0.0.0.0.",
        port
    ));
    lines.push(format!(
        "  3. Si ninguna responde, revisa que el firewall permita conexiones al puerto {}.",
        port
    ));

    lines
}
