//! Spin Gate Client
//!
//! A small, type-safe HTTP client for the Gate API of a continuous-delivery
//! control plane.
//!
//! The client is built once per command from a [`ConnectionConfig`] and then
//! used through the [`ApplicationApi`] trait, which keeps callers testable
//! against a substitute implementation.
//!
//! # Example
//!
//! ```no_run
//! use spin_client::{ApplicationApi, ConnectionConfig, GateClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GateClient::connect(&ConnectionConfig::new("http://localhost:8084"))?;
//!
//!     let response = client.get_pipeline_configs_for_application("myapp").await?;
//!     println!("{} -> {}", response.status, response.payload);
//!     Ok(())
//! }
//! ```

mod connection;
pub mod error;
mod pipelines;

// Re-export commonly used types
pub use connection::{Auth, ConnectionConfig, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
pub use pipelines::ApplicationApi;
pub use reqwest::StatusCode;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Url, redirect};
use serde::de::DeserializeOwned;

/// A response from the Gate API together with its status code
///
/// `payload` is only decoded when the status is exactly `200 OK`; for any
/// other status it holds `T::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status code of the response
    pub status: StatusCode,
    /// Decoded response body
    pub payload: T,
}

impl<T> ApiResponse<T> {
    /// Whether the response carries the expected `200 OK` status
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// HTTP client for the Gate API
#[derive(Debug, Clone)]
pub struct GateClient {
    /// Base URL of Gate (e.g., "http://localhost:8084")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl GateClient {
    /// Create a new Gate client with default HTTP settings and no auth
    ///
    /// # Example
    /// ```
    /// use spin_client::GateClient;
    ///
    /// let client = GateClient::new("http://localhost:8084");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new Gate client with a custom HTTP client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Gate API
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Build an authenticated client from connection settings
    ///
    /// Validates the endpoint, prepares the auth and default headers, and
    /// configures timeout, TLS and redirect handling on the HTTP client.
    /// Redirects are never followed, so a 3xx reaches the caller as-is.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidConfig`] if the endpoint is not an
    /// absolute http(s) URL, a header is malformed, or the HTTP client
    /// cannot be built.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let endpoint = parse_endpoint(&config.endpoint)?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ClientError::invalid_config(format!("header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ClientError::invalid_config(format!("value for header '{}': {}", name, e))
            })?;
            headers.insert(name, value);
        }

        if let Some(auth) = &config.auth {
            let mut value = HeaderValue::from_str(&auth.header_value())
                .map_err(|e| ClientError::invalid_config(format!("authorization header: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| {
                ClientError::invalid_config(format!("failed to build HTTP client: {}", e))
            })?;

        tracing::debug!(endpoint = %endpoint, insecure = config.insecure, "Gate client configured");

        Ok(Self::with_client(endpoint.as_str(), client))
    }

    /// Get the base URL of Gate
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join path segments onto the base URL, encoding each one
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = parse_endpoint(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::invalid_config(format!("'{}' cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response, decoding the body only on `200 OK`
    ///
    /// Any other status is returned with a default payload so the caller
    /// can decide what it means.
    async fn handle_response<T: DeserializeOwned + Default>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Gate responded");

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                status = status.as_u16(),
                body = %body,
                "Skipping body of non-OK response"
            );
            return Ok(ApiResponse {
                status,
                payload: T::default(),
            });
        }

        let payload = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))?;

        Ok(ApiResponse { status, payload })
    }
}

/// Parse and check a Gate endpoint
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| ClientError::invalid_config(format!("endpoint '{}': {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ClientError::invalid_config(format!(
            "endpoint '{}' must use http or https, not {}",
            endpoint, scheme
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = GateClient::new("http://localhost:8084");
        assert_eq!(client.base_url(), "http://localhost:8084");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GateClient::new("http://localhost:8084/");
        assert_eq!(client.base_url(), "http://localhost:8084");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = GateClient::with_client("http://localhost:8084", http_client);
        assert_eq!(client.base_url(), "http://localhost:8084");
    }

    #[test]
    fn test_connect_rejects_relative_endpoint() {
        let err = GateClient::connect(&ConnectionConfig::new("localhost:8084/gate")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig(_)));
    }

    #[test]
    fn test_connect_rejects_non_http_scheme() {
        let config = ConnectionConfig::new("ftp://gate.example.com");
        let err = GateClient::connect(&config).unwrap_err();
        assert!(err.to_string().contains("must use http or https"));
    }

    #[test]
    fn test_connect_rejects_bad_header_name() {
        let config = ConnectionConfig::new("http://localhost:8084")
            .with_header("bad header", "value");
        let err = GateClient::connect(&config).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig(_)));
    }

    #[test]
    fn test_connect_rejects_bad_header_value() {
        let config = ConnectionConfig::new("http://localhost:8084")
            .with_header("X-Team", "line\nbreak");
        assert!(GateClient::connect(&config).is_err());
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = GateClient::new("https://ci.example.com/gate/");
        let url = client.url(&["applications", "myapp"]).unwrap();
        assert_eq!(url.as_str(), "https://ci.example.com/gate/applications/myapp");
    }

    #[test]
    fn test_url_encodes_segments() {
        let client = GateClient::new("http://localhost:8084");
        let url = client.url(&["applications", "team/app one"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8084/applications/team%2Fapp%20one"
        );
    }

    #[tokio::test]
    async fn test_connect_sends_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/applications/myapp/pipelineConfigs"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config =
            ConnectionConfig::new(mock_server.uri()).with_auth(Auth::Bearer("s3cret".into()));
        let client = GateClient::connect(&config).expect("client creation");

        let response = client
            .get_pipeline_configs_for_application("myapp")
            .await
            .unwrap();
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn test_connect_sends_basic_auth_and_default_headers() {
        let mock_server = MockServer::start().await;

        // base64("user:pass")
        Mock::given(method("GET"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .and(header("x-spinnaker-user", "ops"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ConnectionConfig::new(mock_server.uri())
            .with_auth(Auth::Basic {
                username: "user".into(),
                password: "pass".into(),
            })
            .with_header("X-Spinnaker-User", "ops")
            .with_timeout(Duration::from_secs(5));
        let client = GateClient::connect(&config).expect("client creation");

        let response = client
            .get_pipeline_configs_for_application("myapp")
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }
}
