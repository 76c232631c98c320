//! # Insighto Infrastructure
//!
//! Concrete implementations of the ports defined in `insighto-core`:
//! relational storage, session tokens, password hashing and third-party
//! sign-in.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT sessions + Argon2/bcrypt password hashing
//! - `oauth` - Google and GitHub sign-in over reqwest

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "oauth")]
pub mod oauth;

// Re-exports - In-Memory
pub use database::{
    InMemoryPostRepository, InMemorySocialAccountRepository, InMemoryStore,
    InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use database::{Database, DatabaseConfig};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtSessionStore};

#[cfg(feature = "oauth")]
pub use oauth::{GitHubProvider, GoogleProvider, OAuthCredentials};
