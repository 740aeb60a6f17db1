//! Pipeline-related API endpoints

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::{ApiResponse, GateClient};

/// Application-scoped Gate operations
///
/// Trait-based so commands can be exercised against a substitute client.
#[async_trait]
pub trait ApplicationApi: Send + Sync {
    /// Fetch the pipeline configurations registered for an application
    ///
    /// The payload is left undecoded beyond JSON: callers treat it as an
    /// opaque document.
    ///
    /// # Arguments
    /// * `application` - The application name
    ///
    /// # Returns
    /// The response status and, on `200 OK`, the decoded body
    ///
    /// # Errors
    /// Returns an error if no response was obtained or a `200 OK` body is
    /// not valid JSON
    async fn get_pipeline_configs_for_application(
        &self,
        application: &str,
    ) -> Result<ApiResponse<Value>>;
}

#[async_trait]
impl ApplicationApi for GateClient {
    async fn get_pipeline_configs_for_application(
        &self,
        application: &str,
    ) -> Result<ApiResponse<Value>> {
        let url = self.url(&["applications", application, "pipelineConfigs"])?;
        tracing::debug!(%url, "Fetching pipeline configs");

        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}
