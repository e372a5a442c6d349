//! Session context shared by every component that needs the signed-in user
//!
//! The context is provided once at the application root. It fetches the
//! session a single time after hydration and every consumer reads the same
//! signal, so the navbar and the auth page never issue their own fetches.

use leptos::prelude::*;

use crate::core::models::UserSession;

/// Session state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// The session fetch has not completed yet
    #[default]
    Loading,
    /// Nobody is signed in (or the session could not be read)
    Anonymous,
    /// A user is signed in
    Authenticated(UserSession),
}

impl SessionState {
    /// Collapse a session fetch result; a failed fetch counts as signed out
    pub fn from_fetch(result: Result<Option<UserSession>, String>) -> Self {
        match result {
            Ok(Some(user)) => SessionState::Authenticated(user),
            Ok(None) | Err(_) => SessionState::Anonymous,
        }
    }

    pub fn user(&self) -> Option<&UserSession> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Session context providing the current user and actions on it
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(SessionState::Loading),
        }
    }

    pub fn user(&self) -> Option<UserSession> {
        self.state.with(|state| state.user().cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|state| matches!(state, SessionState::Loading))
    }

    /// Publish a freshly signed-in user to every consumer
    ///
    /// Without a profile the session is read back from the server instead.
    pub fn sign_in(&self, user: Option<UserSession>) {
        match user {
            Some(user) => self.state.set(SessionState::Authenticated(user)),
            None => self.refresh(),
        }
    }

    /// Read the session from the server and publish the result
    pub fn refresh(&self) {
        #[cfg(not(feature = "ssr"))]
        {
            use leptos::task::spawn_local;

            let state = self.state;
            spawn_local(async move {
                let result = super::api::fetch_session().await;
                if let Err(err) = &result {
                    leptos::logging::warn!("Session fetch failed, treating as signed out: {}", err);
                }
                state.set(SessionState::from_fetch(result));
            });
        }
    }

    /// Forget the cached user
    pub fn clear(&self) {
        self.state.set(SessionState::Anonymous);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Provide the session context to the component tree
pub fn provide_session_context() -> SessionContext {
    // Loading on both server and client so the hydrated markup matches
    let ctx = SessionContext::new();

    // Runs once after hydration; nothing inside is tracked
    Effect::new(move |_| ctx.refresh());

    provide_context(ctx);
    ctx
}

/// Get the session context from the component tree
pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Terminate the session remotely, then forget it locally
///
/// A failed request leaves the local state untouched and is returned to the caller.
pub async fn logout(ctx: SessionContext) -> Result<(), String> {
    super::api::logout().await?;
    ctx.clear();
    Ok(())
}
