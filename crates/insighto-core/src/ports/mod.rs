//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{
    AuthError, Authorization, DenialReason, IdentityProvider, PasswordService, ProviderProfile,
    SessionStore,
};
pub use repository::{BaseRepository, PostRepository, SocialAccountRepository, UserRepository};
