//! Third-party sign-in over the OAuth 2.0 authorization-code flow.

mod github;
mod google;

use std::env;

use serde::Deserialize;
use url::Url;

use insighto_core::ports::AuthError;

pub use github::GitHubProvider;
pub use google::GoogleProvider;

const USER_AGENT: &str = concat!("insighto/", env!("CARGO_PKG_VERSION"));

/// Client id/secret pair issued by a provider.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl OAuthCredentials {
    /// Read `<PREFIX>_CLIENT_ID` and `<PREFIX>_CLIENT_SECRET`.
    ///
    /// Returns `None` unless both are set and non-empty; the provider is then
    /// simply not offered.
    pub fn from_env(prefix: &str) -> Option<Self> {
        let client_id = env::var(format!("{prefix}_CLIENT_ID")).ok()?;
        let client_secret = env::var(format!("{prefix}_CLIENT_SECRET")).ok()?;
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

/// Token endpoint response; providers report failures in-band.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Minimal authorization-code client shared by the providers.
struct OAuthClient {
    credentials: OAuthCredentials,
    authorize_url: &'static str,
    token_url: &'static str,
    scope: &'static str,
    http: reqwest::Client,
}

impl OAuthClient {
    fn new(
        credentials: OAuthCredentials,
        authorize_url: &'static str,
        token_url: &'static str,
        scope: &'static str,
    ) -> Self {
        Self {
            credentials,
            authorize_url,
            token_url,
            scope,
            http: reqwest::Client::new(),
        }
    }

    fn authorization_url(&self, state: &str, redirect_uri: &str) -> Result<String, AuthError> {
        let url = Url::parse_with_params(
            self.authorize_url,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", self.scope),
                ("state", state),
            ],
        )
        .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<String, AuthError> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(self.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("token request failed: {e}")))?;

        let status = response.status();
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("unreadable token response ({status}): {e}")))?;

        token_from_response(body)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AuthError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("profile request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::Provider(format!(
                "profile request to {url} failed with status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("unreadable profile response: {e}")))
    }
}

fn token_from_response(body: TokenResponse) -> Result<String, AuthError> {
    if let Some(error) = body.error {
        return Err(AuthError::Provider(format!(
            "{error}: {}",
            body.error_description.unwrap_or_default()
        )));
    }
    body.access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::Provider("token response carried no access token".to_string()))
}
