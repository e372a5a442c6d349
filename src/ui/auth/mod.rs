//! Authentication UI module
//!
//! The `/auth` page with its schema-driven sign-up and sign-in forms.

mod auth_page;
mod field;
pub mod form_state;

pub use auth_page::AuthPage;
pub use field::SchemaField;
pub use form_state::AuthFormState;
