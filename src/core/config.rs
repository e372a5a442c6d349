//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the headless commerce backend
    /// Example: https://shop.example.oneentry.cloud
    pub commerce_url: Option<String>,

    /// Application token sent to the backend in the `x-app-token` header
    pub app_token: Option<String>,

    /// Language code passed to localized backend endpoints
    pub lang_code: String,

    /// Marker of the auth provider used for sign-up and sign-in
    pub auth_provider: String,

    /// Marker of the form describing the sign-up fields
    pub signup_form: String,

    /// Marker of the form describing the sign-in fields
    pub signin_form: String,

    /// Whether session cookies carry the `Secure` attribute
    pub secure_cookies: bool,
}

pub const DEFAULT_LANG_CODE: &str = "en_US";
pub const DEFAULT_AUTH_PROVIDER: &str = "email";
pub const DEFAULT_SIGNUP_FORM: &str = "reg";
pub const DEFAULT_SIGNIN_FORM: &str = "login";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            commerce_url: lookup("COMMERCE_API_URL").map(|url| url.trim_end_matches('/').to_string()),
            app_token: lookup("COMMERCE_APP_TOKEN"),
            lang_code: or_default("COMMERCE_LANG", DEFAULT_LANG_CODE),
            auth_provider: or_default("COMMERCE_AUTH_PROVIDER", DEFAULT_AUTH_PROVIDER),
            signup_form: or_default("SIGNUP_FORM_MARKER", DEFAULT_SIGNUP_FORM),
            signin_form: or_default("SIGNIN_FORM_MARKER", DEFAULT_SIGNIN_FORM),
            secure_cookies: lookup("COOKIE_SECURE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Check if the commerce backend is configured
    pub fn has_commerce_url(&self) -> bool {
        self.commerce_url.is_some()
    }

    /// Check if the application token is configured
    pub fn has_app_token(&self) -> bool {
        self.app_token.is_some()
    }

    /// Get the backend URL or panic with a helpful message
    pub fn commerce_url_or_panic(&self) -> &str {
        self.commerce_url
            .as_deref()
            .expect("COMMERCE_API_URL environment variable is not set")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));

        assert!(!config.has_commerce_url());
        assert!(!config.has_app_token());
        assert_eq!(config.lang_code, "en_US");
        assert_eq!(config.auth_provider, "email");
        assert_eq!(config.signup_form, "reg");
        assert_eq!(config.signin_form, "login");
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_config_with_all_fields() {
        let config = Config::from_lookup(lookup_from(&[
            ("COMMERCE_API_URL", "https://shop.example.com/"),
            ("COMMERCE_APP_TOKEN", "token-123"),
            ("COMMERCE_LANG", "de_DE"),
            ("COMMERCE_AUTH_PROVIDER", "phone"),
            ("SIGNUP_FORM_MARKER", "signup"),
            ("SIGNIN_FORM_MARKER", "signin"),
            ("COOKIE_SECURE", "true"),
        ]));

        assert_eq!(config.commerce_url_or_panic(), "https://shop.example.com");
        assert_eq!(config.app_token.as_deref(), Some("token-123"));
        assert_eq!(config.lang_code, "de_DE");
        assert_eq!(config.auth_provider, "phone");
        assert_eq!(config.signup_form, "signup");
        assert_eq!(config.signin_form, "signin");
        assert!(config.secure_cookies);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("COMMERCE_LANG", "  "),
            ("COOKIE_SECURE", "no"),
        ]));

        assert_eq!(config.lang_code, "en_US");
        assert!(!config.secure_cookies);
    }

    #[test]
    #[should_panic(expected = "COMMERCE_API_URL environment variable is not set")]
    fn test_commerce_url_or_panic_failure() {
        let config = Config::from_lookup(lookup_from(&[]));
        config.commerce_url_or_panic();
    }
}
