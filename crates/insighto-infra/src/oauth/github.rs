use async_trait::async_trait;
use serde::Deserialize;

use insighto_core::ports::{AuthError, IdentityProvider, ProviderProfile};

use super::{OAuthClient, OAuthCredentials};

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";
const EMAILS_URL: &str = "https://api.github.com/user/emails";

/// GitHub user information from API
#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// Private profiles hide the email; fall back to the primary verified one.
fn primary_email(emails: Vec<GitHubEmail>) -> Option<String> {
    emails
        .into_iter()
        .find(|e| e.primary && e.verified)
        .map(|e| e.email)
}

impl GitHubUser {
    fn into_profile(self, access_token: String) -> ProviderProfile {
        ProviderProfile {
            provider: "github".to_string(),
            provider_account_id: self.id.to_string(),
            email: self.email,
            name: self.name.or(Some(self.login)),
            image: self.avatar_url,
            access_token: Some(access_token),
        }
    }
}

pub struct GitHubProvider {
    client: OAuthClient,
}

impl GitHubProvider {
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            client: OAuthClient::new(credentials, AUTHORIZE_URL, TOKEN_URL, "read:user user:email"),
        }
    }

    pub fn from_env() -> Option<Self> {
        OAuthCredentials::from_env("GITHUB").map(Self::new)
    }
}

#[async_trait]
impl IdentityProvider for GitHubProvider {
    fn id(&self) -> &'static str {
        "github"
    }

    fn name(&self) -> &'static str {
        "GitHub"
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
        let mut user: GitHubUser = self.client.get_json(USER_URL, &access_token).await?;

        if user.email.is_none() {
            let emails: Vec<GitHubEmail> = self.client.get_json(EMAILS_URL, &access_token).await?;
            user.email = primary_email(emails);
        }

        Ok(user.into_profile(access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url() {
        let provider = GitHubProvider::new(OAuthCredentials {
            client_id: "gh-client".to_string(),
            client_secret: "gh-secret".to_string(),
        });

        let url = provider
            .authorization_url("xyz", "https://app.insighto.io/api/auth/callback/github")
            .unwrap();

        assert!(url.contains("github.com/login/oauth/authorize"));
        assert!(url.contains("client_id=gh-client"));
        assert!(url.contains("state=xyz"));
        assert!(url.contains("redirect_uri="));
        assert!(url.contains("scope="));
    }

    #[test]
    fn test_profile_falls_back_to_login_for_name() {
        let user: GitHubUser = serde_json::from_str(
            r#"{"id":583231,"login":"octocat","name":null,"email":"octo@github.com","avatar_url":"https://avatars/u/583231"}"#,
        )
        .unwrap();

        let profile = user.into_profile("gho_x".to_string());
        assert_eq!(profile.provider_account_id, "583231");
        assert_eq!(profile.name.as_deref(), Some("octocat"));
        assert_eq!(profile.email.as_deref(), Some("octo@github.com"));
    }

    #[test]
    fn test_primary_email_requires_verified() {
        let emails: Vec<GitHubEmail> = serde_json::from_str(
            r#"[
                {"email":"old@example.com","primary":false,"verified":true},
                {"email":"main@example.com","primary":true,"verified":true}
            ]"#,
        )
        .unwrap();
        assert_eq!(primary_email(emails).as_deref(), Some("main@example.com"));

        let unverified: Vec<GitHubEmail> =
            serde_json::from_str(r#"[{"email":"x@example.com","primary":true,"verified":false}]"#)
                .unwrap();
        assert_eq!(primary_email(unverified), None);
    }
}
