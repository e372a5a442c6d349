//! Browser-side calls to the storefront API
//!
//! `Err` means the request itself failed (network, server error, unreadable
//! body). An application-level refusal from the backend comes back as
//! `Ok(ApiReply::Rejected(message))`.

use crate::core::models::{
    AuthMode, FormFieldDescriptor, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse,
    UserSession,
};

/// Answer of an action endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply<T> {
    Accepted(T),
    Rejected(String),
}

#[cfg(not(feature = "ssr"))]
async fn reply<T: serde::de::DeserializeOwned>(
    response: gloo_net::http::Response,
) -> Result<ApiReply<T>, String> {
    use crate::core::models::ApiError;

    if response.ok() {
        return response
            .json::<T>()
            .await
            .map(ApiReply::Accepted)
            .map_err(|e| e.to_string());
    }

    let status = response.status();
    if (400..500).contains(&status) {
        if let Ok(error) = response.json::<ApiError>().await {
            return Ok(ApiReply::Rejected(error.message));
        }
    }

    Err(format!("Request failed with status {}", status))
}

/// Fetch the field descriptors of the form for `mode`
#[cfg(not(feature = "ssr"))]
pub async fn fetch_form_fields(mode: AuthMode) -> Result<Vec<FormFieldDescriptor>, String> {
    use gloo_net::http::Request;

    let response = Request::get(&format!("/api/forms/{}", mode.slug()))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response.json().await.map_err(|e| e.to_string())
}

#[cfg(feature = "ssr")]
pub async fn fetch_form_fields(_mode: AuthMode) -> Result<Vec<FormFieldDescriptor>, String> {
    Err("Not available on server".to_string())
}

/// Create an account
#[cfg(not(feature = "ssr"))]
pub async fn sign_up(request: &SignUpRequest) -> Result<ApiReply<SignUpResponse>, String> {
    use gloo_net::http::Request;

    let response = Request::post("/api/auth/sign-up")
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    reply(response).await
}

#[cfg(feature = "ssr")]
pub async fn sign_up(_request: &SignUpRequest) -> Result<ApiReply<SignUpResponse>, String> {
    Err("Not available on server".to_string())
}

/// Create a session from credentials
#[cfg(not(feature = "ssr"))]
pub async fn sign_in(request: &SignInRequest) -> Result<ApiReply<SignInResponse>, String> {
    use gloo_net::http::Request;

    let response = Request::post("/api/auth/sign-in")
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    reply(response).await
}

#[cfg(feature = "ssr")]
pub async fn sign_in(_request: &SignInRequest) -> Result<ApiReply<SignInResponse>, String> {
    Err("Not available on server".to_string())
}

/// Read the current session; `Ok(None)` when nobody is signed in
#[cfg(not(feature = "ssr"))]
pub async fn fetch_session() -> Result<Option<UserSession>, String> {
    use gloo_net::http::Request;

    let response = Request::get("/api/auth/session")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response.json().await.map_err(|e| e.to_string())
}

#[cfg(feature = "ssr")]
pub async fn fetch_session() -> Result<Option<UserSession>, String> {
    Err("Not available on server".to_string())
}

/// Terminate the current session
#[cfg(not(feature = "ssr"))]
pub async fn logout() -> Result<(), String> {
    use gloo_net::http::Request;

    let response = Request::post("/api/auth/logout")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.ok() {
        Ok(())
    } else {
        Err(format!("Request failed with status {}", response.status()))
    }
}

#[cfg(feature = "ssr")]
pub async fn logout() -> Result<(), String> {
    Err("Not available on server".to_string())
}
