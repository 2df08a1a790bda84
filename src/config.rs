//! Application configuration loaded from environment variables.

use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port for the status endpoints.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Probe Configuration ===
    /// Port probed on every local address.
    #[serde(default = "default_port")]
    pub probe_port: u16,

    /// Per-request timeout for the probe, in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    // === Login Smoke Test ===
    /// Login endpoint exercised by the smoke test.
    #[serde(default = "default_login_url")]
    pub login_url: String,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    3000
}

fn default_probe_timeout_ms() -> u64 {
    5000
}

fn default_login_url() -> String {
    "http://localhost:3000/auth/login".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Listening port.
    pub port: Option<u16>,
    /// Probed port.
    pub probe_port: Option<u16>,
    /// Probe timeout in milliseconds.
    pub probe_timeout_ms: Option<u64>,
    /// Login endpoint.
    pub login_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            probe_port: default_port(),
            probe_timeout_ms: default_probe_timeout_ms(),
            login_url: default_login_url(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Load configuration, apply overrides and reject invalid values.
    pub fn load_with(overrides: Overrides) -> crate::error::Result<Self> {
        Self::load()?.apply(overrides)
    }

    /// Apply command-line overrides, then validate the result.
    pub fn apply(mut self, overrides: Overrides) -> crate::error::Result<Self> {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(port) = overrides.probe_port {
            self.probe_port = port;
        }
        if let Some(timeout_ms) = overrides.probe_timeout_ms {
            self.probe_timeout_ms = timeout_ms;
        }
        if let Some(url) = overrides.login_url {
            self.login_url = url;
        }

        self.validate().map_err(AppError::InvalidConfig)?;
        Ok(self)
    }

    /// Log filter for this configuration.
    ///
    /// `verbose` forces debug output for this crate; otherwise `RUST_LOG`
    /// decides, falling back to `info` when it does not parse.
    pub fn log_filter(&self, verbose: bool) -> EnvFilter {
        if verbose {
            return EnvFilter::new("status_api=debug,info");
        }
        EnvFilter::try_new(&self.rust_log)
            .unwrap_or_else(|_| EnvFilter::new(default_log_level()))
    }

    /// Build configuration from an explicit set of variables.
    ///
    /// Keys follow the environment naming (`PORT`, `PROBE_TIMEOUT_MS`, ...).
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be greater than 0".to_string());
        }

        if self.probe_port == 0 {
            return Err("PROBE_PORT must be greater than 0".to_string());
        }

        if self.probe_timeout_ms == 0 {
            return Err("PROBE_TIMEOUT_MS must be greater than 0".to_string());
        }

        if let Err(e) = Url::parse(&self.login_url) {
            return Err(format!("LOGIN_URL is not a valid URL: {}", e));
        }

        Ok(())
    }

    /// Probe timeout as a [`std::time::Duration`].
    pub fn probe_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.probe_timeout_ms)
    }
}
