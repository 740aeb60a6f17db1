//! Configuration module
//!
//! Handles CLI configuration: how to reach Gate, which credentials to use,
//! and how results are printed.

use spin_client::{Auth, ConnectionConfig, DEFAULT_TIMEOUT};
use std::time::Duration;

use crate::output::OutputFormat;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Gate service
    pub gate_endpoint: String,

    /// Basic auth username
    pub username: Option<String>,

    /// Basic auth password
    pub password: Option<String>,

    /// Bearer token, preferred over basic auth when both are set
    pub token: Option<String>,

    /// Accept invalid TLS certificates
    pub insecure: bool,

    /// Per-request timeout
    pub timeout: Duration,

    /// Headers added to every request
    pub default_headers: Vec<(String, String)>,

    /// Format used to print results
    pub output: OutputFormat,

    /// Disable ANSI colors
    pub no_color: bool,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gate_endpoint.is_empty() {
            anyhow::bail!("gate endpoint cannot be empty");
        }

        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        match (&self.username, &self.password) {
            (Some(_), None) => anyhow::bail!("--username requires --password"),
            (None, Some(_)) => anyhow::bail!("--password requires --username"),
            _ => {}
        }

        Ok(())
    }

    /// Connection settings for the Gate client
    pub fn connection(&self) -> ConnectionConfig {
        let mut connection = ConnectionConfig::new(self.gate_endpoint.clone())
            .with_timeout(self.timeout)
            .with_insecure(self.insecure);

        if let Some(auth) = self.auth() {
            connection = connection.with_auth(auth);
        }

        for (name, value) in &self.default_headers {
            connection = connection.with_header(name.clone(), value.clone());
        }

        connection
    }

    fn auth(&self) -> Option<Auth> {
        if let Some(token) = &self.token {
            return Some(Auth::Bearer(token.clone()));
        }

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Auth::Basic {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gate_endpoint: "http://localhost:8084".to_string(),
            username: None,
            password: None,
            token: None,
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
            default_headers: Vec::new(),
            output: OutputFormat::Json,
            no_color: false,
        }
    }
}
