//! Core storefront models and the server-side backend integration

#[cfg(feature = "ssr")]
pub mod commerce;
#[cfg(feature = "ssr")]
pub mod config;
pub mod models;

pub use models::*;
