//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod session_issuer;
pub mod sign_up;
pub mod validation;

// Re-exports
pub use config::RegistrationConfig;
pub use session_issuer::ServerSessionIssuer;
pub use sign_up::{SignUpOutcome, SignUpUseCase};
pub use validation::SignUpValidator;
