//! Domain Layer
//!
//! Contains entities, value objects, repository and collaborator traits.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{auth_session::AuthSession, user::User};
pub use repository::{SessionRepository, UserRepository};
pub use services::{CookieSink, PasswordHasher, SessionIssuer, UserIdGenerator, Validator};
