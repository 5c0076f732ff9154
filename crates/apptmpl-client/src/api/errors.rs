//! Endpoints that always fail, one per response error shape.

use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;

/// Client for the error simulation endpoints.
///
/// Each call is expected to return `Err`; an `Ok` means the server stopped
/// failing on purpose.
pub struct ErrorsApi {
    client: ApiClient,
}

impl ErrorsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Structured JSON error with only a message.
    pub async fn json_basic(&self) -> Result<()> {
        self.probe("errors/json/basic").await
    }

    /// Structured JSON error with a code and data.
    pub async fn json_complete(&self) -> Result<()> {
        self.probe("errors/json/complete").await
    }

    /// JSON error that isn't in the structured shape.
    pub async fn payload(&self) -> Result<()> {
        self.probe("errors/payload").await
    }

    /// Plain-text error.
    pub async fn text(&self) -> Result<()> {
        self.probe("errors/text").await
    }

    async fn probe(&self, path: &str) -> Result<()> {
        let url = self.client.private_url(path)?;
        self.client
            .execute(url, RequestOptions::get().skip_auth())
            .await?;
        Ok(())
    }
}
