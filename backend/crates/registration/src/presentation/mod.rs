//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the response cookie sink.

pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod router;

pub use cookies::ResponseCookies;
pub use handlers::RegistrationAppState;
pub use router::{DefaultSignUpUseCase, registration_router};
