//! Storefront API endpoints
//!
//! The browser never talks to the commerce backend directly; it calls these
//! endpoints instead:
//! - GET  /api/forms/{mode} - Field descriptors for `sign-up` or `sign-in`
//! - POST /api/auth/sign-up - Create an account
//! - POST /api/auth/sign-in - Verify credentials and set session cookies
//! - GET  /api/auth/session - Current user, or `null`
//! - POST /api/auth/logout  - Terminate the session and remove cookies

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use super::client::{CommerceClient, CommerceError, SessionTokens};
use crate::core::models::{
    ApiError, AuthMode, REQUIRED_FIELDS_MESSAGE, SignInRequest, SignInResponse, SignUpRequest,
    SignUpResponse, UserSession,
};

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Storefront API state containing the commerce client
#[derive(Clone)]
pub struct StorefrontApiState {
    pub commerce: CommerceClient,
    pub secure_cookies: bool,
}

/// Convert CommerceError to API response
impl IntoResponse for CommerceError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            CommerceError::Rejected { status, .. } => (
                StatusCode::from_u16(*status)
                    .ok()
                    .filter(StatusCode::is_client_error)
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                "REJECTED",
            ),
            CommerceError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            CommerceError::Transport(_) => (StatusCode::BAD_GATEWAY, "BACKEND_UNAVAILABLE"),
            CommerceError::InvalidResponse(_) => (StatusCode::BAD_GATEWAY, "INVALID_RESPONSE"),
        };

        let body = ApiError::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

/// Create the storefront API router
pub fn storefront_api_router(state: StorefrontApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/forms/{mode}", get(form_fields_handler))
        .route("/api/auth/sign-up", post(sign_up_handler))
        .route("/api/auth/sign-in", post(sign_in_handler))
        .route("/api/auth/session", get(session_handler))
        .route("/api/auth/logout", post(logout_handler))
        .with_state(state)
}

fn missing_fields() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(REQUIRED_FIELDS_MESSAGE, "MISSING_FIELDS")),
    )
        .into_response()
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn without_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_COOKIE).path("/"))
}

/// GET /api/forms/{mode}
async fn form_fields_handler(
    State(state): State<Arc<StorefrontApiState>>,
    Path(mode): Path<String>,
) -> Result<Response, CommerceError> {
    let fields = match AuthMode::from_slug(&mode) {
        Some(AuthMode::SignUp) => state.commerce.signup_fields().await,
        Some(AuthMode::SignIn) => state.commerce.signin_fields().await,
        None => {
            return Ok((
                StatusCode::NOT_FOUND,
                Json(ApiError::new(format!("Unknown form: {mode}"), "NOT_FOUND")),
            )
                .into_response());
        }
    };

    match fields {
        Ok(fields) => Ok(Json(fields).into_response()),
        Err(err) => {
            tracing::warn!("Failed to load {} form: {}", mode, err);
            Err(err)
        }
    }
}

/// POST /api/auth/sign-up
async fn sign_up_handler(
    State(state): State<Arc<StorefrontApiState>>,
    Json(request): Json<SignUpRequest>,
) -> Result<Response, CommerceError> {
    if !request.is_complete() {
        return Ok(missing_fields());
    }

    let identifier = state.commerce.sign_up(&request).await?;
    tracing::info!("Account created: {}", identifier);

    Ok(Json(SignUpResponse { identifier }).into_response())
}

/// POST /api/auth/sign-in
async fn sign_in_handler(
    State(state): State<Arc<StorefrontApiState>>,
    jar: CookieJar,
    Json(request): Json<SignInRequest>,
) -> Result<Response, CommerceError> {
    if !request.is_complete() {
        return Ok(missing_fields());
    }

    let tokens = state.commerce.sign_in(&request).await?;

    // The session is valid even if the profile lookup fails; the page will
    // pick the user up on the next session fetch.
    let user = match state.commerce.current_user(&tokens.access_token).await {
        Ok(user) => Some(user),
        Err(err) => {
            tracing::warn!("Signed in but failed to load profile: {}", err);
            None
        }
    };

    let mut jar = jar.add(session_cookie(
        ACCESS_COOKIE,
        tokens.access_token,
        state.secure_cookies,
    ));
    if let Some(refresh_token) = tokens.refresh_token {
        jar = jar.add(session_cookie(
            REFRESH_COOKIE,
            refresh_token,
            state.secure_cookies,
        ));
    }

    Ok((jar, Json(SignInResponse { user })).into_response())
}

/// GET /api/auth/session
async fn session_handler(
    State(state): State<Arc<StorefrontApiState>>,
    jar: CookieJar,
) -> Result<Response, CommerceError> {
    let Some(access_token) = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string()) else {
        return Ok(Json(None::<UserSession>).into_response());
    };

    match state.commerce.current_user(&access_token).await {
        Ok(user) => Ok(Json(Some(user)).into_response()),
        Err(CommerceError::Unauthorized) => {
            Ok((without_session(jar), Json(None::<UserSession>)).into_response())
        }
        Err(err) => {
            tracing::warn!("Failed to read session: {}", err);
            Err(err)
        }
    }
}

/// POST /api/auth/logout
async fn logout_handler(
    State(state): State<Arc<StorefrontApiState>>,
    jar: CookieJar,
) -> Response {
    if let Some(access_token) = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string()) {
        let tokens = SessionTokens {
            access_token,
            refresh_token: jar.get(REFRESH_COOKIE).map(|c| c.value().to_string()),
        };

        // Cookies are removed regardless; the backend session expires on its own
        if let Err(err) = state.commerce.logout(&tokens).await {
            tracing::warn!("Backend logout failed: {}", err);
        }
    }

    (without_session(jar), StatusCode::NO_CONTENT).into_response()
}
