//! Storefront data shared by the server API and the browser components.
//!
//! Field names follow the commerce backend's JSON (camelCase) so the same
//! types can be passed through the storefront API unchanged.

use serde::{Deserialize, Serialize};

/// Marker of the field that is rendered as a masked input.
pub const PASSWORD_MARKER: &str = "password";
/// Marker of the profile entry holding the account's display name.
pub const NAME_MARKER: &str = "name";
pub const EMAIL_MARKER: &str = "email";

/// Localized texts attached to a form attribute
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizeInfos {
    #[serde(default)]
    pub title: String,
}

/// One input of a remotely described form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldDescriptor {
    pub marker: String,
    #[serde(default)]
    pub localize_infos: LocalizeInfos,
}

/// How a descriptor is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
}

impl FieldKind {
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Secret => "password",
        }
    }
}

impl FormFieldDescriptor {
    pub fn new(marker: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            localize_infos: LocalizeInfos {
                title: title.into(),
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.localize_infos.title
    }

    pub fn kind(&self) -> FieldKind {
        if self.marker == PASSWORD_MARKER {
            FieldKind::Secret
        } else {
            FieldKind::Text
        }
    }

    pub fn placeholder(&self) -> String {
        format!("Enter your {}", self.title().to_lowercase())
    }
}

/// A single profile value of a user entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormDataEntry {
    pub marker: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// The signed-in account as reported by the commerce backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    #[serde(default)]
    pub id: serde_json::Value,
    pub identifier: String,
    #[serde(default)]
    pub form_data: Vec<FormDataEntry>,
}

impl UserSession {
    /// Value of the `name` profile entry, when it is a non-empty string
    pub fn display_name(&self) -> Option<&str> {
        self.form_data
            .iter()
            .find(|entry| entry.marker == NAME_MARKER)
            .and_then(|entry| entry.value.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn avatar_initial(&self) -> Option<char> {
        self.display_name().and_then(|name| name.chars().next())
    }
}

/// Message shown when a mode-required field is left empty
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill out all required fields.";

/// Variant of the authentication form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignUp,
    SignIn,
}

impl AuthMode {
    /// Mode selected by the `type` query parameter of `/auth`.
    ///
    /// Only `login` selects sign-in; anything else, including absence, is sign-up.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("login") => AuthMode::SignIn,
            _ => AuthMode::SignUp,
        }
    }

    /// Value of the `type` query parameter selecting this mode
    pub fn query_value(&self) -> &'static str {
        match self {
            AuthMode::SignUp => "signup",
            AuthMode::SignIn => "login",
        }
    }

    /// Address of the auth page opened in this mode
    pub fn auth_href(&self) -> String {
        format!("/auth?type={}", self.query_value())
    }

    /// Path segment used by `/api/forms/{mode}`
    pub fn slug(&self) -> &'static str {
        match self {
            AuthMode::SignUp => "sign-up",
            AuthMode::SignIn => "sign-in",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "sign-up" => Some(AuthMode::SignUp),
            "sign-in" => Some(AuthMode::SignIn),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AuthMode::SignUp => AuthMode::SignIn,
            AuthMode::SignIn => AuthMode::SignUp,
        }
    }

    /// Markers that must be non-empty before a submission is sent
    pub fn required_markers(&self) -> &'static [&'static str] {
        match self {
            AuthMode::SignUp => &[EMAIL_MARKER, PASSWORD_MARKER, NAME_MARKER],
            AuthMode::SignIn => &[EMAIL_MARKER, PASSWORD_MARKER],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl SignUpRequest {
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty() && !self.name.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

/// Body returned by `POST /api/auth/sign-up`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignUpResponse {
    pub identifier: String,
}

/// Body returned by `POST /api/auth/sign-in`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignInResponse {
    pub user: Option<UserSession>,
}

/// Error body of every non-2xx storefront API response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
    pub code: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}
