//! CLI command handlers.

pub mod repl;
pub mod context;
pub mod status;

use anyhow::Result;
use apptmpl_client::{ApiClient, ClientContext, DEFAULT_BASE_URL};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Server URL given on the command line or in the environment.
    pub server: Option<String>,
    /// Named connection context to use.
    pub context: Option<String>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build a client context for the selected server.
    ///
    /// The server comes from `--server`, then the selected or current
    /// context in client.yaml, then the built-in default.
    pub fn connect(&self) -> Result<ClientContext> {
        let config = apptmpl_config::load_client_config()?;
        let selected = config.resolve(self.context.as_deref())?;

        let server = self
            .server
            .clone()
            .or_else(|| selected.map(|c| c.server.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        tracing::debug!(%server, context = ?selected.map(|c| &c.name), "connecting");

        let client = ApiClient::builder()
            .base_url(server)
            .timeout(config.timeout_for(selected))
            .build()?;
        Ok(ClientContext::new(client))
    }
}
