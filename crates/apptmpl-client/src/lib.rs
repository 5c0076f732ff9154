//! HTTP client SDK for the app-tmpl backend.
//!
//! This crate provides a typed, cookie-session client for the admin API
//! (`/api/admin/v1`) and the public private API (`/api/private/v1`).
//!
//! # Example
//!
//! ```no_run
//! use apptmpl_client::{ApiClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = ApiClient::builder()
//!     .base_url("http://localhost:5050")
//!     .build()?;
//!
//! // Check server health
//! if client.system().is_healthy().await {
//!     println!("Server is healthy!");
//! }
//!
//! // Sign in; the identity lands in the session store
//! let user = client.auth().login("alice", "pw").await?;
//! println!("Signed in as {}", user.name);
//!
//! // Failed responses come back typed
//! if let Err(err) = client.errors().json_basic().await {
//!     if let Some(response) = err.as_response() {
//!         println!("{}: {}", response.name(), response.message());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Request pipeline
//!
//! Every call funnels through [`ApiClient::execute`]: bodies go out as JSON,
//! session cookies are attached unless the endpoint is public, a 401 triggers
//! one session renewal and one retry, and failed responses are classified into
//! a [`ResponseError`] by [`classify::classify`].

pub mod api;
pub mod classify;
pub mod client;
pub mod context;
pub mod error;
pub mod pending;
pub mod session;
pub mod types;

pub use client::{ApiClient, ClientBuilder, RequestOptions, DEFAULT_BASE_URL};
pub use context::ClientContext;
pub use error::{Error, ErrorKind, ResponseError, Result};
pub use pending::PendingErrors;
pub use session::SessionStore;
pub use types::*;
