//! # Insighto Core
//!
//! The domain layer of the Insighto backend.
//! Entities, ports and the authentication rules, with no infrastructure
//! dependencies.

pub mod auth;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
