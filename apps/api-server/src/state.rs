//! Application state - shared across all handlers.

use std::sync::Arc;

use insighto_core::auth::Authenticator;
use insighto_core::ports::{
    IdentityProvider, PasswordService, PostRepository, SessionStore, SocialAccountRepository,
    UserRepository,
};
use insighto_infra::{Argon2PasswordService, InMemoryStore, JwtSessionStore};

#[cfg(feature = "postgres")]
use insighto_infra::database::{
    Database, PostgresPostRepository, PostgresSocialAccountRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub base_url: String,
    pub secure_cookies: bool,
    pub users: Arc<dyn UserRepository>,
    pub social_accounts: Arc<dyn SocialAccountRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub authenticator: Arc<Authenticator>,
    pub sessions: Arc<dyn SessionStore>,
    pub providers: Vec<Arc<dyn IdentityProvider>>,
    #[cfg(feature = "postgres")]
    pub db: Option<Database>,
}

struct Repositories {
    users: Arc<dyn UserRepository>,
    social_accounts: Arc<dyn SocialAccountRepository>,
    posts: Arc<dyn PostRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(store.users()),
            social_accounts: Arc::new(store.social_accounts()),
            posts: Arc::new(store.posts()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(db: &Database) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.shared())),
            social_accounts: Arc::new(PostgresSocialAccountRepository::new(db.shared())),
            posts: Arc::new(PostgresPostRepository::new(db.shared())),
        }
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (db, repos) = match &config.database {
            Some(db_config) => match Database::connect(db_config).await {
                Ok(db) => {
                    let repos = Repositories::postgres(&db);
                    (Some(db), repos)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (None, Repositories::in_memory())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Repositories::in_memory())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        let state = Self::assemble(
            config.base_url.clone(),
            config.secure_cookies(),
            repos,
            Arc::new(JwtSessionStore::new(config.session.clone())),
            Arc::new(Argon2PasswordService::new()),
            configured_providers(),
        );

        tracing::info!(
            providers = state.providers.len(),
            "Application state initialized"
        );

        #[cfg(feature = "postgres")]
        return Self { db, ..state };

        #[cfg(not(feature = "postgres"))]
        state
    }

    fn assemble(
        base_url: String,
        secure_cookies: bool,
        repos: Repositories,
        sessions: Arc<dyn SessionStore>,
        passwords: Arc<dyn PasswordService>,
        providers: Vec<Arc<dyn IdentityProvider>>,
    ) -> Self {
        let authenticator = Arc::new(Authenticator::new(repos.users.clone(), passwords));

        Self {
            base_url,
            secure_cookies,
            users: repos.users,
            social_accounts: repos.social_accounts,
            posts: repos.posts,
            authenticator,
            sessions,
            providers,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Look up an enabled third-party provider by id.
    pub fn provider(&self, id: &str) -> Option<&Arc<dyn IdentityProvider>> {
        self.providers.iter().find(|p| p.id() == id)
    }

    /// In-memory state with a fixed signing secret, for handler tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        use insighto_infra::JwtConfig;

        Self::assemble(
            "http://localhost:3000".to_string(),
            false,
            Repositories::in_memory(),
            Arc::new(JwtSessionStore::new(JwtConfig {
                secret: "test-secret".to_string(),
                ..JwtConfig::default()
            })),
            Arc::new(Argon2PasswordService::new()),
            Vec::new(),
        )
    }
}

#[cfg(feature = "oauth")]
fn configured_providers() -> Vec<Arc<dyn IdentityProvider>> {
    use insighto_infra::{GitHubProvider, GoogleProvider};

    let mut providers: Vec<Arc<dyn IdentityProvider>> = Vec::new();
    if let Some(google) = GoogleProvider::from_env() {
        providers.push(Arc::new(google));
    }
    if let Some(github) = GitHubProvider::from_env() {
        providers.push(Arc::new(github));
    }

    for provider in &providers {
        tracing::info!(provider = provider.id(), "Sign-in provider enabled");
    }
    providers
}

#[cfg(not(feature = "oauth"))]
fn configured_providers() -> Vec<Arc<dyn IdentityProvider>> {
    Vec::new()
}
