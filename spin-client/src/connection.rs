//! Connection settings used to build a [`GateClient`](crate::GateClient)

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials attached to every request
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP basic auth
    Basic { username: String, password: String },
    /// Bearer token (e.g., an OAuth2 access token obtained elsewhere)
    Bearer(String),
}

impl Auth {
    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        match self {
            Auth::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
            }
            Auth::Bearer(token) => format!("Bearer {}", token),
        }
    }
}

// Never print secrets
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Auth::Bearer(_) => f.debug_tuple("Bearer").field(&"***").finish(),
        }
    }
}

/// Everything needed to open a session against Gate
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Gate base URL
    pub endpoint: String,
    /// Optional credentials
    pub auth: Option<Auth>,
    /// Accept invalid TLS certificates
    pub insecure: bool,
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra headers sent with every request
    pub default_headers: Vec<(String, String)>,
}

impl ConnectionConfig {
    /// Settings for an unauthenticated endpoint with default timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth: None,
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
            default_headers: Vec::new(),
        }
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}
