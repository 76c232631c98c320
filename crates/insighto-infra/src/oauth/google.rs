use async_trait::async_trait;
use serde::Deserialize;

use insighto_core::ports::{AuthError, IdentityProvider, ProviderProfile};

use super::{OAuthClient, OAuthCredentials};

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// OpenID Connect userinfo payload.
#[derive(Debug, Deserialize)]
struct GoogleUser {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl GoogleUser {
    fn into_profile(self, access_token: String) -> ProviderProfile {
        ProviderProfile {
            provider: "google".to_string(),
            provider_account_id: self.sub,
            email: self.email,
            name: self.name,
            image: self.picture,
            access_token: Some(access_token),
        }
    }
}

pub struct GoogleProvider {
    client: OAuthClient,
}

impl GoogleProvider {
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            client: OAuthClient::new(credentials, AUTHORIZE_URL, TOKEN_URL, "openid email profile"),
        }
    }

    pub fn from_env() -> Option<Self> {
        OAuthCredentials::from_env("GOOGLE").map(Self::new)
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn id(&self) -> &'static str {
        "google"
    }

    fn name(&self) -> &'static str {
        "Google"
    }

    fn authorization_url(&self, state: &str, redirect_uri: &str) -> Result<String, AuthError> {
        self.client.authorization_url(state, redirect_uri)
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ProviderProfile, AuthError> {
        let access_token = self.client.exchange_code(code, redirect_uri).await?;
        let user: GoogleUser = self.client.get_json(USERINFO_URL, &access_token).await?;
        Ok(user.into_profile(access_token))
    }
}
