//! SeaORM entities mirroring the relational schema.

pub mod ai_insight;
pub mod analytics_result;
pub mod enums;
pub mod linked_identity;
pub mod post;
pub mod social_account;
pub mod user;
