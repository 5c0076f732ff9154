//! Authentication API.
//!
//! Every successful sign-in path ends by fetching the identity and storing it,
//! so the session store never lags behind the server's cookies.

use reqwest::Method;

use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{ApiUser, Credentials, Registration, User};

/// Current user.
pub(crate) const USER_PATH: &str = "user";

/// The session itself: POST to create, PUT to renew, DELETE to end.
pub(crate) const SESSION_PATH: &str = "user/session";

/// Authentication API client.
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Sign in and store the resulting identity.
    ///
    /// A 401 here means bad credentials, so no renewal is attempted. Unlike
    /// other authenticated calls, a failed login never goes through `refresh`.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let url = self.client.admin_url(SESSION_PATH)?;
        let opts = RequestOptions::new(Method::POST)
            .json(&Credentials { username, password })?
            .skip_refresh();
        self.client.execute(url, opts).await?;

        let user = self.whoami().await?;
        tracing::info!(user = %user.id, "logged in");
        Ok(user)
    }

    /// End the session on the server and forget the identity.
    ///
    /// The local identity is cleared whether or not the server call succeeds.
    pub async fn logout(&self) -> Result<()> {
        let url = self.client.admin_url(SESSION_PATH)?;
        let result = self
            .client
            .execute(url, RequestOptions::new(Method::DELETE))
            .await;
        self.client.clear_session();

        match result {
            Ok(_) => {
                tracing::info!("logged out");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "server-side logout failed, cleared local session");
                Err(err)
            }
        }
    }

    /// Renew the session and store the refreshed identity.
    pub async fn refresh(&self) -> Result<User> {
        self.client.renew_session().await
    }

    /// Fetch the current identity and store it.
    pub async fn whoami(&self) -> Result<User> {
        let url = self.client.admin_url(USER_PATH)?;
        let payload = self.client.execute(url, RequestOptions::get()).await?;
        self.client.store_identity(payload)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, username: &str, password: &str, email: &str) -> Result<User> {
        let url = self.client.admin_url(USER_PATH)?;
        let opts = RequestOptions::new(Method::POST)
            .json(&Registration {
                username,
                password,
                email,
            })?
            .skip_refresh();
        let payload = self.client.execute(url, opts).await?;
        Ok(payload.into_typed::<ApiUser>()?.into())
    }
}
