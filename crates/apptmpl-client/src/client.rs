//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::api::{auth, AuthApi, ErrorsApi, SystemApi};
use crate::classify::{classify, decode_success};
use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::types::{ApiUser, Payload, User};

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix of the session-scoped admin API.
const ADMIN_API: &str = "api/admin/v1/";

/// Prefix of the public private API.
const PRIVATE_API: &str = "api/private/v1/";

/// Options for a single logical request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// JSON body.
    pub body: Option<Value>,
    /// Don't send or accept session cookies.
    pub skip_auth: bool,
    /// Don't renew the session on a 401.
    pub skip_refresh: bool,
}

impl RequestOptions {
    /// Options for a request with the given method.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            skip_auth: false,
            skip_refresh: false,
        }
    }

    /// A plain GET.
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// Attach a JSON body.
    pub fn json<B: serde::Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Send without credentials.
    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    /// Fail on 401 instead of renewing the session.
    pub fn skip_refresh(mut self) -> Self {
        self.skip_refresh = true;
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// app-tmpl API client.
///
/// Clones share the cookie jar and the session store.
///
/// # Example
///
/// ```no_run
/// use apptmpl_client::ApiClient;
///
/// # async fn example() -> apptmpl_client::Result<()> {
/// let client = ApiClient::builder()
///     .base_url("http://localhost:5050")
///     .build()?;
///
/// let user = client.auth().login("alice", "pw").await?;
/// assert_eq!(client.session().get(), Some(user));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
struct ClientInner {
    /// HTTP client carrying the cookie jar.
    http: reqwest::Client,
    /// HTTP client with no cookie store, for public endpoints.
    anonymous: reqwest::Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Request timeout.
    timeout: Duration,
    /// Current identity.
    session: SessionStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("session", &self.inner.session)
            .finish()
    }
}

impl ApiClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default settings pointing to localhost.
    pub fn localhost() -> Result<Self> {
        Self::builder().build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The session store. Read-only from outside the crate.
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the authentication API.
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access the health and version probes.
    pub fn system(&self) -> SystemApi {
        SystemApi::new(self.clone())
    }

    /// Access the deliberately failing endpoints.
    pub fn errors(&self) -> ErrorsApi {
        ErrorsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // URLs
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL under the admin API.
    pub fn admin_url(&self, path: &str) -> Result<Url> {
        self.url(ADMIN_API, path)
    }

    /// Build a URL under the private API.
    pub fn private_url(&self, path: &str) -> Result<Url> {
        self.url(PRIVATE_API, path)
    }

    fn url(&self, prefix: &str, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner
            .base_url
            .join(&format!("{}{}", prefix, path))
            .map_err(Error::from)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request execution
    // ─────────────────────────────────────────────────────────────────────────

    /// Perform one logical request.
    ///
    /// A 401 triggers a single session renewal followed by a single retry with
    /// `skip_refresh` set, so at most two attempts reach the endpoint. A 401 on
    /// a request that may not refresh clears the session. Renewal failures are
    /// returned as-is. Transport errors pass through unclassified.
    pub async fn execute(&self, url: Url, opts: RequestOptions) -> Result<Payload> {
        let response = self.send(&url, &opts).await?;
        if opts.skip_refresh || response.status() != StatusCode::UNAUTHORIZED {
            return self.finish(response).await;
        }

        tracing::debug!(%url, "unauthenticated, renewing session before retry");
        self.renew_session().await?;

        let retry = RequestOptions {
            skip_refresh: true,
            ..opts
        };
        self.execute_once(&url, &retry).await
    }

    /// One attempt, never renewing.
    async fn execute_once(&self, url: &Url, opts: &RequestOptions) -> Result<Payload> {
        let response = self.send(url, opts).await?;
        self.finish(response).await
    }

    async fn send(&self, url: &Url, opts: &RequestOptions) -> Result<reqwest::Response> {
        let http = if opts.skip_auth {
            &self.inner.anonymous
        } else {
            &self.inner.http
        };

        let mut request = http
            .request(opts.method.clone(), url.clone())
            .timeout(self.inner.timeout);
        if let Some(body) = &opts.body {
            request = request.json(body);
        }

        tracing::debug!(
            method = %opts.method,
            %url,
            skip_auth = opts.skip_auth,
            skip_refresh = opts.skip_refresh,
            "sending request"
        );
        let response = request.send().await?;
        tracing::debug!(status = response.status().as_u16(), %url, "received response");
        Ok(response)
    }

    /// Interpret a response that won't be retried.
    async fn finish(&self, response: reqwest::Response) -> Result<Payload> {
        if response.status() == StatusCode::UNAUTHORIZED && self.inner.session.set(None).is_some() {
            tracing::warn!(url = %response.url(), "session rejected, cleared identity");
        }
        read_response(response).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session maintenance (shared with the auth API)
    // ─────────────────────────────────────────────────────────────────────────

    /// Renew the session cookies, then reload and store the identity.
    ///
    /// Neither step renews on a 401, so this never recurses.
    pub(crate) async fn renew_session(&self) -> Result<User> {
        let url = self.admin_url(auth::SESSION_PATH)?;
        let opts = RequestOptions::new(Method::PUT).skip_refresh();
        if let Err(err) = self.execute_once(&url, &opts).await {
            tracing::warn!(error = %err, "session renewal failed");
            return Err(err);
        }
        tracing::info!("session renewed");

        let url = self.admin_url(auth::USER_PATH)?;
        let payload = self
            .execute_once(&url, &RequestOptions::get().skip_refresh())
            .await?;
        self.store_identity(payload)
    }

    /// Decode an identity response and make it the current session.
    pub(crate) fn store_identity(&self, payload: Payload) -> Result<User> {
        let user: User = payload.into_typed::<ApiUser>()?.into();
        self.inner.session.set(Some(user.clone()));
        Ok(user)
    }

    /// Sign out locally.
    pub(crate) fn clear_session(&self) {
        self.inner.session.set(None);
    }
}

/// Read the body and decode or classify it.
async fn read_response(response: reqwest::Response) -> Result<Payload> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await?;

    if status.is_success() {
        decode_success(status.as_u16(), content_type.as_deref(), &body)
    } else {
        Err(classify(status.as_u16(), content_type.as_deref(), &body)?.into())
    }
}

/// Builder for creating an ApiClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    cookie_jar: Option<Arc<Jar>>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            cookie_jar: None,
        }
    }

    /// Set the base URL for the server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Share a cookie jar with other clients.
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be a base URL", base_url)));
        }
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("apptmpl-client/{}", env!("CARGO_PKG_VERSION")));

        let jar = self.cookie_jar.unwrap_or_default();
        let http = reqwest::Client::builder()
            .cookie_provider(jar)
            .user_agent(user_agent.clone())
            .build()?;
        let anonymous = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                anonymous,
                base_url,
                timeout: self.timeout,
                session: SessionStore::new(),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_localhost() {
        let client = ClientBuilder::new().build().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5050/");
        assert!(client.session().get().is_none());
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = ClientBuilder::new()
            .base_url("http://example.com/app")
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "http://example.com/app/");
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        assert!(matches!(
            ClientBuilder::new().base_url("not a url").build(),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientBuilder::new().base_url("mailto:a@x.com").build(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_url_building() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:5050")
            .build()
            .unwrap();

        let url = client.admin_url("user/session").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5050/api/admin/v1/user/session");

        let url = client.private_url("/errors/json/basic").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5050/api/private/v1/errors/json/basic");
    }

    #[test]
    fn test_request_options() {
        let opts = RequestOptions::new(Method::POST)
            .json(&serde_json::json!({"username": "alice"}))
            .unwrap()
            .skip_auth();
        assert_eq!(opts.method, Method::POST);
        assert!(opts.skip_auth);
        assert!(!opts.skip_refresh);
        assert_eq!(opts.body.unwrap()["username"], "alice");

        let opts = RequestOptions::default();
        assert_eq!(opts.method, Method::GET);
        assert!(opts.body.is_none());
    }
}
