//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use kernel::error::{app_error::AppError, kind::ErrorKind};

use crate::application::sign_up::SignUpOutcome;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::GENERIC_FAILURE_MESSAGE;
use crate::presentation::cookies::ResponseCookies;
use crate::presentation::dto::SignUpRequest;
use crate::presentation::router::DefaultSignUpUseCase;

/// Shared state for registration handlers
pub struct RegistrationAppState<R>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    pub use_case: Arc<DefaultSignUpUseCase<R>>,
}

// Manual impl: deriving would require `R: Clone`
impl<R> Clone for RegistrationAppState<R>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            use_case: self.use_case.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
///
/// 303 to the configured location with the session cookie on success,
/// `{"error": ...}` otherwise.
pub async fn sign_up<R>(
    State(state): State<RegistrationAppState<R>>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Response
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected malformed sign up body");
            return AppError::bad_request(GENERIC_FAILURE_MESSAGE).into_response();
        }
    };

    let mut cookies = ResponseCookies::new();
    let outcome = state.use_case.execute(req.into(), &mut cookies).await;

    outcome_response(outcome, cookies)
}

fn outcome_response(outcome: SignUpOutcome, cookies: ResponseCookies) -> Response {
    match outcome {
        SignUpOutcome::Success { location, .. } => {
            let mut response = Redirect::to(&location).into_response();
            if let Some(set_cookie) = cookies.into_header_value() {
                response.headers_mut().append(header::SET_COOKIE, set_cookie);
            }
            response
        }
        failure => {
            let kind = failure
                .error_kind()
                .unwrap_or(ErrorKind::InternalServerError);
            let message = failure.error_message().unwrap_or(GENERIC_FAILURE_MESSAGE);
            AppError::new(kind, message).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::application::config::RegistrationConfig;
    use crate::infra::memory::InMemoryRegistrationRepository;
    use crate::presentation::router::registration_router;

    fn signup_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/signup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_of(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["error"].as_str().unwrap().to_string()
    }

    const ALICE: &str = r#"{"username":"Alice","email":"a@x.com","password":"Secret123!"}"#;

    #[tokio::test]
    async fn test_signup_redirects_with_session_cookie() {
        let app = registration_router(
            InMemoryRegistrationRepository::new(),
            RegistrationConfig::with_random_secret(),
        );

        let response = app.oneshot(signup_request(ALICE)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let cookies: Vec<_> = response.headers().get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(cookies.len(), 1);
        let cookie = cookies[0].to_str().unwrap();
        assert!(cookie.starts_with("auth_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let app = registration_router(
            InMemoryRegistrationRepository::new(),
            RegistrationConfig::development(),
        );

        let first = app.clone().oneshot(signup_request(ALICE)).await.unwrap();
        assert_eq!(first.status(), StatusCode::SEE_OTHER);

        let second = app
            .oneshot(signup_request(
                r#"{"username":"ALICE","email":"b@x.com","password":"Secret123!"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert!(second.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(error_of(second).await, "Username already taken");
    }

    #[tokio::test]
    async fn test_invalid_input_gets_generic_message() {
        let app = registration_router(
            InMemoryRegistrationRepository::new(),
            RegistrationConfig::development(),
        );

        let response = app
            .clone()
            .oneshot(signup_request(
                r#"{"username":"no spaces","email":"a@x.com","password":"Secret123!"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_of(response).await,
            "Something went wrong. Please try again."
        );

        let response = app.oneshot(signup_request("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_of(response).await,
            "Something went wrong. Please try again."
        );
    }
}
