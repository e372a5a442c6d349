//! HTTP client for the headless commerce backend
//!
//! Wraps the handful of backend endpoints the storefront needs: form
//! definitions, account creation, credential sign-in, the current user and
//! logout. Every call is a single request; nothing is cached or retried.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::config::Config;
use crate::core::models::{
    EMAIL_MARKER, FormFieldDescriptor, NAME_MARKER, PASSWORD_MARKER, SignInRequest,
    SignUpRequest, UserSession,
};

/// Commerce backend error types
#[derive(Debug, thiserror::Error)]
pub enum CommerceError {
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Commerce backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from commerce backend: {0}")]
    InvalidResponse(String),
}

/// Tokens issued by a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FormResponse {
    #[serde(default)]
    attributes: Vec<FormFieldDescriptor>,
}

#[derive(Debug, Deserialize)]
struct SignUpEntity {
    identifier: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthEntity {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Client for the commerce backend REST API
#[derive(Debug, Clone)]
pub struct CommerceClient {
    http: Client,
    base_url: String,
    app_token: Option<String>,
    lang_code: String,
    auth_provider: String,
    signup_form: String,
    signin_form: String,
}

impl CommerceClient {
    /// Create a client for the backend at `base_url` using the markers from `config`
    pub fn new(base_url: impl Into<String>, config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_token: config.app_token.clone(),
            lang_code: config.lang_code.clone(),
            auth_provider: config.auth_provider.clone(),
            signup_form: config.signup_form.clone(),
            signin_form: config.signin_form.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.commerce_url_or_panic(), config)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.app_token {
            Some(token) => builder.header("x-app-token", token),
            None => builder,
        }
    }

    fn users_path(&self, action: &str) -> String {
        format!(
            "/api/content/users/auth-providers/marker/{}/users/{}",
            self.auth_provider, action
        )
    }

    /// Field descriptors of the form identified by `marker`, in backend order
    pub async fn form_fields(&self, marker: &str) -> Result<Vec<FormFieldDescriptor>, CommerceError> {
        let response = self
            .request(Method::GET, &format!("/api/content/forms/marker/{marker}"))
            .query(&[("langCode", self.lang_code.as_str())])
            .send()
            .await?;

        let form: FormResponse = ensure_success(response).await?.json().await?;
        Ok(form.attributes)
    }

    pub async fn signup_fields(&self) -> Result<Vec<FormFieldDescriptor>, CommerceError> {
        self.form_fields(&self.signup_form).await
    }

    pub async fn signin_fields(&self) -> Result<Vec<FormFieldDescriptor>, CommerceError> {
        self.form_fields(&self.signin_form).await
    }

    /// Create an account and return its identifier
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<String, CommerceError> {
        let body = json!({
            "formIdentifier": self.signup_form,
            "langCode": self.lang_code,
            "authData": [
                { "marker": EMAIL_MARKER, "value": request.email },
                { "marker": PASSWORD_MARKER, "value": request.password },
            ],
            "formData": [
                { "marker": NAME_MARKER, "type": "string", "value": request.name },
            ],
            "notificationData": {
                "email": request.email,
                "phonePush": [],
                "phoneSMS": "",
            },
        });

        let response = self
            .request(Method::POST, &self.users_path("sign-up"))
            .json(&body)
            .send()
            .await?;

        let entity: SignUpEntity = ensure_success(response).await?.json().await?;
        entity
            .identifier
            .ok_or_else(|| CommerceError::InvalidResponse("sign-up without identifier".to_string()))
    }

    /// Verify credentials and obtain session tokens
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<SessionTokens, CommerceError> {
        let body = json!({
            "authData": [
                { "marker": EMAIL_MARKER, "value": request.email },
                { "marker": PASSWORD_MARKER, "value": request.password },
            ],
        });

        let response = self
            .request(Method::POST, &self.users_path("auth"))
            .json(&body)
            .send()
            .await?;

        let entity: AuthEntity = ensure_success(response).await?.json().await?;
        let access_token = entity
            .access_token
            .ok_or_else(|| CommerceError::InvalidResponse("sign-in without access token".to_string()))?;

        Ok(SessionTokens {
            access_token,
            refresh_token: entity.refresh_token,
        })
    }

    /// The account owning `access_token`
    ///
    /// A 401/403 from the backend is reported as `CommerceError::Unauthorized`.
    pub async fn current_user(&self, access_token: &str) -> Result<UserSession, CommerceError> {
        let response = self
            .request(Method::GET, "/api/content/users/me")
            .query(&[("langCode", self.lang_code.as_str())])
            .bearer_auth(access_token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(CommerceError::Unauthorized);
        }

        Ok(ensure_success(response).await?.json().await?)
    }

    /// Terminate the backend session
    pub async fn logout(&self, tokens: &SessionTokens) -> Result<(), CommerceError> {
        let response = self
            .request(Method::POST, &self.users_path("logout"))
            .bearer_auth(&tokens.access_token)
            .json(&json!({ "refreshToken": tokens.refresh_token }))
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `CommerceError::Rejected` carrying the backend message
async fn ensure_success(response: Response) -> Result<Response, CommerceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| error_message(&value))
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    Err(CommerceError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Extract `message` from a backend error body; it is either a string or a list of strings
fn error_message(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> Config {
        Config::from_lookup(|key| match key {
            "COMMERCE_APP_TOKEN" => Some("app-token".to_string()),
            _ => None,
        })
    }

    async fn client_for(server: &MockServer) -> CommerceClient {
        CommerceClient::new(server.uri(), &test_config())
    }

    #[test]
    fn test_error_message_variants() {
        assert_eq!(
            error_message(&json!({ "message": "User already exists" })),
            Some("User already exists".to_string())
        );
        assert_eq!(
            error_message(&json!({ "message": ["email must be an email", "password too short"] })),
            Some("email must be an email; password too short".to_string())
        );
        assert_eq!(error_message(&json!({ "message": "" })), None);
        assert_eq!(error_message(&json!({ "statusCode": 500 })), None);
    }

    #[tokio::test]
    async fn test_form_fields_sends_token_and_lang() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/content/forms/marker/reg"))
            .and(query_param("langCode", "en_US"))
            .and(header("x-app-token", "app-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "identifier": "reg",
                "attributes": [
                    { "marker": "name", "localizeInfos": { "title": "Name" } },
                    { "marker": "email", "localizeInfos": { "title": "Email" } },
                    { "marker": "password", "localizeInfos": { "title": "Password" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fields = client_for(&server).await.signup_fields().await.unwrap();

        let markers: Vec<&str> = fields.iter().map(|f| f.marker.as_str()).collect();
        assert_eq!(markers, vec!["name", "email", "password"]);
    }

    #[tokio::test]
    async fn test_sign_up_posts_auth_and_form_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/content/users/auth-providers/marker/email/users/sign-up"))
            .and(body_partial_json(json!({
                "formIdentifier": "reg",
                "formData": [{ "marker": "name", "type": "string", "value": "Ann" }]
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "id": 3, "identifier": "ann@example.com" })),
            )
            .mount(&server)
            .await;

        let request = SignUpRequest {
            email: "ann@example.com".to_string(),
            password: "secret".to_string(),
            name: "Ann".to_string(),
        };
        let identifier = client_for(&server).await.sign_up(&request).await.unwrap();

        assert_eq!(identifier, "ann@example.com");
    }

    #[tokio::test]
    async fn test_sign_up_rejection_keeps_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "statusCode": 400,
                "message": "User with this email already exists"
            })))
            .mount(&server)
            .await;

        let request = SignUpRequest {
            email: "ann@example.com".to_string(),
            password: "secret".to_string(),
            name: "Ann".to_string(),
        };
        let err = client_for(&server).await.sign_up(&request).await.unwrap_err();

        match err {
            CommerceError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "User with this email already exists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sign_in_returns_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/content/users/auth-providers/marker/email/users/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userIdentifier": "ann@example.com",
                "accessToken": "access-1",
                "refreshToken": "refresh-1"
            })))
            .mount(&server)
            .await;

        let request = SignInRequest {
            email: "ann@example.com".to_string(),
            password: "secret".to_string(),
        };
        let tokens = client_for(&server).await.sign_in(&request).await.unwrap();

        assert_eq!(tokens.access_token, "access-1");
        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_rejection_without_body_uses_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let request = SignInRequest {
            email: "ann@example.com".to_string(),
            password: "secret".to_string(),
        };
        let err = client_for(&server).await.sign_in(&request).await.unwrap_err();

        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[tokio::test]
    async fn test_current_user_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/content/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .current_user("expired")
            .await
            .unwrap_err();

        assert!(matches!(err, CommerceError::Unauthorized));
    }

    #[tokio::test]
    async fn test_current_user_uses_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/content/users/me"))
            .and(header("authorization", "Bearer access-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 9,
                "identifier": "ann@example.com",
                "formData": [{ "marker": "name", "type": "string", "value": "Ann" }]
            })))
            .mount(&server)
            .await;

        let user = client_for(&server)
            .await
            .current_user("access-1")
            .await
            .unwrap();

        assert_eq!(user.identifier, "ann@example.com");
        assert_eq!(user.display_name(), Some("Ann"));
    }
}
