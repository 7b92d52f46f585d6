//! Registration (Signup) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, collaborator and repository traits
//! - `application/` - Sign-up use case, validator, session issuer, config
//! - `infra/` - PostgreSQL / in-memory repositories, hashing, id generation
//! - `presentation/` - HTTP handler, DTOs, router, response cookie sink
//!
//! ## Flow
//! validate → hash password → generate user id → username check →
//! email check → create user → issue session → write cookie → redirect
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (m=19456 KiB, t=2, p=1, 32-byte output)
//! - Plaintext passwords are zeroized and never logged or stored
//! - Username/email uniqueness is case-insensitive and enforced atomically
//!   by the repository, not only by the pre-checks
//! - Session cookies carry an HMAC-signed session id

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::RegistrationConfig;
pub use application::sign_up::{SignUpOutcome, SignUpUseCase};
pub use error::{RegistrationError, RegistrationResult};
pub use infra::memory::InMemoryRegistrationRepository;
pub use infra::postgres::PgRegistrationRepository;
pub use presentation::router::registration_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
