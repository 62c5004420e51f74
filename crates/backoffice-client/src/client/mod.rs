//! HTTP client for the wholesaler back-office REST API.
//!
//! Every request except login carries the bearer token supplied by the
//! client's [`TokenProvider`]. Non-2xx responses surface as typed
//! [`ClientError`] variants; nothing is retried.

mod products;
mod variants;

use std::sync::Arc;
use std::time::Duration;

use backoffice_core::AppConfig;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::{AuthFailure, ClientError};
use crate::token::{SessionToken, TokenProvider};
use crate::types::{AuthErrorBody, LoginBody, LoginResponse};

const LOGIN_PATH: &str = "auth/login";

/// Client for the back-office REST API.
///
/// Paths are resolved against `base_url` (for example
/// `https://admin.example.com/api`), so `wholesaler/products/variants`
/// becomes `https://admin.example.com/api/wholesaler/products/variants`.
pub struct AdminClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl AdminClient {
    /// Creates a client with the given timeout, `User-Agent`, and token source.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse as an absolute URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends relative paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    /// Creates a client from application config.
    ///
    /// The bearer token lives in a [`SessionToken`] seeded with the configured
    /// access token. When no token is configured but both login credentials
    /// are, the client signs in before returning.
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::new`], plus any error from [`AdminClient::sign_in`].
    pub async fn connect(config: &AppConfig) -> Result<Self, ClientError> {
        let session = Arc::new(SessionToken::with_token(config.access_token.clone()));
        let client = Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            session.clone(),
        )?;

        if session.bearer_token().is_none() {
            if let (Some(user_id), Some(password)) =
                (&config.login_user_id, &config.login_password)
            {
                client.sign_in(&session, user_id, password).await?;
            }
        }
        Ok(client)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Exchanges a user id and password for an access token.
    ///
    /// The caller decides where to keep the returned token (for example a
    /// [`crate::SessionToken`] shared with this client).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Auth`] if the server answers 401; the failure kind is
    ///   taken from the `code` field of the error body.
    /// - [`ClientError::UnexpectedStatus`] / [`ClientError::NotFound`] for any
    ///   other non-2xx status.
    /// - [`ClientError::Http`] / [`ClientError::Deserialize`] on network or
    ///   body failures.
    pub async fn login(&self, user_id: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let url = self.endpoint(LOGIN_PATH)?;
        let response = self
            .request(Method::POST, url.clone())
            .json(&LoginBody { user_id, password })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let body: AuthErrorBody = response.json().await.unwrap_or_default();
            let failure = AuthFailure::from_code(body.code.as_deref(), body.message);
            tracing::warn!(user_id, ?failure, "login rejected");
            return Err(ClientError::Auth(failure));
        }

        let response = Self::check_status(response, &url)?;
        let login: LoginResponse = Self::decode(response, "login").await?;
        tracing::info!(user_id, "login succeeded");
        Ok(login)
    }

    /// Logs in and stores the access token in `session`, so every later
    /// request from a client sharing that session carries it.
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::login`]; `session` is left untouched on failure.
    pub async fn sign_in(
        &self,
        session: &SessionToken,
        user_id: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let login = self.login(user_id, password).await?;
        session.set(login.access_token.clone());
        Ok(login)
    }

    /// Resolves an API path (no leading slash) against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })
    }

    /// Like [`Self::endpoint`], appending query parameters via
    /// [`Url::query_pairs_mut`] so values are percent-encoded.
    pub(crate) fn endpoint_with_query(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, ClientError> {
        let mut url = self.endpoint(path)?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Starts a request, attaching the bearer token unless `url` is the
    /// login endpoint.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let is_login = url.path().ends_with(LOGIN_PATH);
        tracing::debug!(%method, %url, "sending request");
        let builder = self.client.request(method, url);
        match self.tokens.bearer_token() {
            Some(token) if !is_login => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Sends a request and deserializes a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        builder: RequestBuilder,
        url: &Url,
        context: &str,
    ) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let response = Self::check_status(response, url)?;
        Self::decode(response, context).await
    }

    /// Sends a request whose response body is ignored.
    pub(crate) async fn send_empty(builder: RequestBuilder, url: &Url) -> Result<(), ClientError> {
        let response = builder.send().await?;
        Self::check_status(response, url)?;
        Ok(())
    }

    fn check_status(response: Response, url: &Url) -> Result<Response, ClientError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, ClientError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
