//! Health and version probes.

use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{ApiVersion, VersionInfo};

const HEALTH_PATH: &str = "health";
const VERSION_PATH: &str = "version";

/// System API client.
///
/// Both endpoints are public and are called without credentials.
pub struct SystemApi {
    client: ApiClient,
}

impl SystemApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Check basic health. The server answers 204 when up.
    pub async fn health(&self) -> Result<()> {
        let url = self.client.private_url(HEALTH_PATH)?;
        self.client
            .execute(url, RequestOptions::get().skip_auth())
            .await?;
        Ok(())
    }

    /// Simple connectivity check - returns true if server is reachable.
    pub async fn is_healthy(&self) -> bool {
        self.health().await.is_ok()
    }

    /// Fetch the server's build and environment details.
    pub async fn version(&self) -> Result<VersionInfo> {
        let url = self.client.private_url(VERSION_PATH)?;
        let payload = self
            .client
            .execute(url, RequestOptions::get().skip_auth())
            .await?;
        Ok(payload.into_typed::<ApiVersion>()?.into())
    }
}
