//! Caller-facing state built around one client.
//!
//! Tracks server health, the latest version snapshot, whether the startup
//! identity check has finished, and errors waiting to be shown.

use parking_lot::Mutex;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::pending::PendingErrors;
use crate::types::{User, VersionInfo};

#[derive(Debug, Default)]
struct ProbeState {
    healthy: bool,
    initialized: bool,
    version: VersionInfo,
}

/// A client plus the state a front end renders from.
#[derive(Debug)]
pub struct ClientContext {
    client: ApiClient,
    state: Mutex<ProbeState>,
    errors: PendingErrors,
}

impl ClientContext {
    /// Wrap a client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Mutex::new(ProbeState::default()),
            errors: PendingErrors::new(),
        }
    }

    /// The wrapped client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Whether the last health probe succeeded.
    pub fn healthy(&self) -> bool {
        self.state.lock().healthy
    }

    /// Whether the startup identity check has run.
    pub fn initialized(&self) -> bool {
        self.state.lock().initialized
    }

    /// The latest version snapshot.
    pub fn version(&self) -> VersionInfo {
        self.state.lock().version.clone()
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.client.session().get()
    }

    /// Queue an error for the user to acknowledge.
    pub fn add_err(&self, err: Error) {
        self.errors.push(err);
    }

    /// Take the oldest unacknowledged error.
    pub fn ack_err(&self) -> Option<Error> {
        self.errors.ack()
    }

    /// Number of errors waiting.
    pub fn pending_errors(&self) -> usize {
        self.errors.len()
    }

    /// Keep a success, queue a failure.
    pub fn capture<T>(&self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.add_err(err);
                None
            }
        }
    }

    /// Probe health, then version; then, if healthy, load the identity.
    ///
    /// Failures land in the error queue. `initialized` is set once the identity
    /// check has finished, whatever its outcome.
    pub async fn bootstrap(&self) {
        if self.refresh_probes().await {
            self.capture(self.client.auth().whoami().await);
            self.state.lock().initialized = true;
        }
    }

    /// Re-run the health and version probes. Returns the new health flag.
    pub async fn refresh_probes(&self) -> bool {
        let system = self.client.system();
        if self.capture(system.health().await).is_none() {
            self.state.lock().healthy = false;
            return false;
        }
        self.state.lock().healthy = true;

        self.refresh_version().await;
        true
    }

    /// Fetch the version and replace the snapshot on success.
    pub async fn refresh_version(&self) -> Option<VersionInfo> {
        let version = self.capture(self.client.system().version().await)?;
        self.state.lock().version = version.clone();
        Some(version)
    }
}
