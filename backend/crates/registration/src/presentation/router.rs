//! Registration Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::{
    config::RegistrationConfig, session_issuer::ServerSessionIssuer, sign_up::SignUpUseCase,
    validation::SignUpValidator,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::infra::{id_generator::RandomUserIdGenerator, password_hasher::Argon2PasswordHasher};
use crate::presentation::handlers::{self, RegistrationAppState};

/// Sign-up use case wired with the default collaborators
pub type DefaultSignUpUseCase<R> = SignUpUseCase<
    SignUpValidator,
    Argon2PasswordHasher,
    RandomUserIdGenerator,
    R,
    ServerSessionIssuer<R>,
>;

/// Build the default use case over a repository
pub fn default_sign_up_use_case<R>(repo: R, config: RegistrationConfig) -> DefaultSignUpUseCase<R>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);

    SignUpUseCase::new(
        Arc::new(SignUpValidator::new()),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(RandomUserIdGenerator::new(config.user_id_entropy_bytes)),
        repo.clone(),
        Arc::new(ServerSessionIssuer::new(repo, config.clone())),
        config,
    )
}

/// Create the registration router for any repository implementation
pub fn registration_router<R>(repo: R, config: RegistrationConfig) -> Router
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let state = RegistrationAppState {
        use_case: Arc::new(default_sign_up_use_case(repo, config)),
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .with_state(state)
}
