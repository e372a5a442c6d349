pub mod api;
pub mod auth;
pub mod icon;
pub mod navbar;
pub mod notifications;
pub mod pages;
pub mod session;

pub use icon::{Icon, icons};
pub use notifications::{Toast, Toaster, provide_toaster, use_toaster};
pub use session::{SessionContext, SessionState, provide_session_context, use_session_context};
