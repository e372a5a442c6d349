//! Commerce backend integration
//!
//! This module provides the server side of the storefront:
//! - An HTTP client for the headless commerce backend
//! - REST API endpoints the browser components call

pub mod api;
pub mod client;

pub use api::{StorefrontApiState, storefront_api_router};
pub use client::{CommerceClient, CommerceError, SessionTokens};
