//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtSessionStore};
pub use password::Argon2PasswordService;
