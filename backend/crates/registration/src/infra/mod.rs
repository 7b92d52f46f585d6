//! Infrastructure Layer
//!
//! Database implementations and technical collaborators.

pub mod id_generator;
pub mod memory;
pub mod password_hasher;
pub mod postgres;

pub use id_generator::RandomUserIdGenerator;
pub use memory::InMemoryRegistrationRepository;
pub use password_hasher::Argon2PasswordHasher;
pub use postgres::PgRegistrationRepository;
