//! State of the sign-up / sign-in form
//!
//! All transitions live here so the component only wires events and requests
//! to them. Every mode entry starts a new request generation; responses that
//! carry an older ticket are ignored.

use std::collections::BTreeMap;

use crate::core::models::{
    AuthMode, EMAIL_MARKER, FormFieldDescriptor, NAME_MARKER, PASSWORD_MARKER,
    REQUIRED_FIELDS_MESSAGE, SignInRequest, SignUpRequest, UserSession,
};

pub const SCHEMA_LOAD_FAILED_MESSAGE: &str = "Failed to load form data. Please try again";
pub const SUBMIT_FAILED_MESSAGE: &str = "An error occurred. Please try again.";

/// Identifies the request generation a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic counter of request generations
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: u64,
}

impl RequestGeneration {
    /// Start a new generation; tickets from earlier ones become stale
    pub fn begin(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn current(&self) -> Ticket {
        Ticket(self.current)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}

/// Values typed into the form, keyed by field marker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputValues(BTreeMap<String, String>);

impl InputValues {
    pub fn get(&self, marker: &str) -> &str {
        self.0.get(marker).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, marker: impl Into<String>, value: impl Into<String>) {
        self.0.insert(marker.into(), value.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Required markers of `mode` that are still empty
    pub fn missing(&self, mode: AuthMode) -> Vec<&'static str> {
        mode.required_markers()
            .iter()
            .copied()
            .filter(|marker| self.get(marker).is_empty())
            .collect()
    }
}

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Submitting,
}

/// Validated request ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    SignUp(SignUpRequest),
    SignIn(SignInRequest),
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The account was created
    SignedUp { identifier: String },
    /// Credentials were accepted
    SignedIn(Option<UserSession>),
    /// The backend refused with a message
    Rejected(String),
    /// The request did not complete
    Failed,
}

/// What the component has to do after a submission settles
#[derive(Debug, Clone, PartialEq)]
pub enum FollowUp {
    Nothing,
    /// Account created; confirm it and load the sign-in schema for `ticket`
    ConfirmSignUp(Ticket),
    /// Publish the session and leave the page
    Redirect(Option<UserSession>),
}

/// Complete state of the authentication form
#[derive(Debug, Clone)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub phase: Phase,
    pub fields: Vec<FormFieldDescriptor>,
    pub inputs: InputValues,
    pub error: Option<String>,
    generation: RequestGeneration,
}

impl AuthFormState {
    /// Initial state for `mode`; the caller loads the schema with the returned ticket
    pub fn new(mode: AuthMode) -> (Self, Ticket) {
        let mut state = Self {
            mode,
            phase: Phase::Loading,
            fields: Vec::new(),
            inputs: InputValues::default(),
            error: None,
            generation: RequestGeneration::default(),
        };
        let ticket = state.generation.begin();
        (state, ticket)
    }

    /// Switch to `mode`, clearing inputs and error, and start a schema load
    pub fn enter_mode(&mut self, mode: AuthMode) -> Ticket {
        self.mode = mode;
        self.phase = Phase::Loading;
        self.fields.clear();
        self.inputs.clear();
        self.error = None;
        self.generation.begin()
    }

    pub fn toggle(&mut self) -> Ticket {
        self.enter_mode(self.mode.toggled())
    }

    /// Apply a schema response; returns false when the response was stale
    pub fn schema_loaded(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<FormFieldDescriptor>, String>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }

        match result {
            Ok(fields) => self.fields = fields,
            Err(_) => {
                self.fields.clear();
                self.error = Some(SCHEMA_LOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.phase = Phase::Ready;
        true
    }

    pub fn set_input(&mut self, marker: impl Into<String>, value: impl Into<String>) {
        self.inputs.set(marker, value);
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Whether the submit button is active
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Ready && !self.fields.is_empty()
    }

    /// Validate and move to `Submitting`
    ///
    /// Returns `None` when nothing must be sent: the form is not ready, or a
    /// required field is empty (the error is set in that case).
    pub fn begin_submit(&mut self) -> Option<(Ticket, Submission)> {
        if self.phase != Phase::Ready {
            return None;
        }

        self.error = None;
        if !self.inputs.missing(self.mode).is_empty() {
            self.error = Some(REQUIRED_FIELDS_MESSAGE.to_string());
            return None;
        }

        let email = self.inputs.get(EMAIL_MARKER).to_string();
        let password = self.inputs.get(PASSWORD_MARKER).to_string();
        let submission = match self.mode {
            AuthMode::SignUp => Submission::SignUp(SignUpRequest {
                email,
                password,
                name: self.inputs.get(NAME_MARKER).to_string(),
            }),
            AuthMode::SignIn => Submission::SignIn(SignInRequest { email, password }),
        };

        self.phase = Phase::Submitting;
        Some((self.generation.current(), submission))
    }

    /// Apply the result of a submission started with `ticket`
    pub fn submit_finished(&mut self, ticket: Ticket, outcome: SubmitOutcome) -> FollowUp {
        // A stale ticket never owns the current phase
        if !self.generation.is_current(ticket) {
            return FollowUp::Nothing;
        }

        self.phase = Phase::Ready;
        match outcome {
            SubmitOutcome::SignedUp { .. } => {
                FollowUp::ConfirmSignUp(self.enter_mode(AuthMode::SignIn))
            }
            SubmitOutcome::SignedIn(user) => {
                self.inputs.clear();
                FollowUp::Redirect(user)
            }
            SubmitOutcome::Rejected(message) => {
                self.error = Some(message);
                FollowUp::Nothing
            }
            SubmitOutcome::Failed => {
                self.error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                FollowUp::Nothing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_fields() -> Vec<FormFieldDescriptor> {
        vec![
            FormFieldDescriptor::new("name", "Name"),
            FormFieldDescriptor::new("email", "Email"),
            FormFieldDescriptor::new("password", "Password"),
        ]
    }

    fn signin_fields() -> Vec<FormFieldDescriptor> {
        vec![
            FormFieldDescriptor::new("email", "Email"),
            FormFieldDescriptor::new("password", "Password"),
        ]
    }

    fn ready(mode: AuthMode) -> AuthFormState {
        let (mut state, ticket) = AuthFormState::new(mode);
        let fields = match mode {
            AuthMode::SignUp => signup_fields(),
            AuthMode::SignIn => signin_fields(),
        };
        assert!(state.schema_loaded(ticket, Ok(fields)));
        state
    }

    fn fill(state: &mut AuthFormState, pairs: &[(&str, &str)]) {
        for (marker, value) in pairs {
            state.set_input(*marker, *value);
        }
    }

    #[test]
    fn test_new_state_is_loading() {
        let (state, _) = AuthFormState::new(AuthMode::SignIn);

        assert_eq!(state.mode, AuthMode::SignIn);
        assert!(state.is_loading());
        assert!(!state.can_submit());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_schema_load_makes_form_ready() {
        let state = ready(AuthMode::SignUp);

        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.fields.len(), 3);
        assert!(state.can_submit());
    }

    #[test]
    fn test_schema_failure_sets_error_and_disables_submit() {
        let (mut state, ticket) = AuthFormState::new(AuthMode::SignUp);

        assert!(state.schema_loaded(ticket, Err("502".to_string())));

        assert_eq!(state.error.as_deref(), Some(SCHEMA_LOAD_FAILED_MESSAGE));
        assert!(!state.is_loading());
        assert!(!state.can_submit());
    }

    #[test]
    fn test_toggle_clears_inputs_and_error() {
        let mut state = ready(AuthMode::SignUp);
        fill(&mut state, &[("email", "ann@example.com")]);
        state.error = Some("Not valid".to_string());

        state.toggle();

        assert_eq!(state.mode, AuthMode::SignIn);
        assert_eq!(state.inputs, InputValues::default());
        assert!(state.error.is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn test_stale_schema_response_is_ignored() {
        let (mut state, first) = AuthFormState::new(AuthMode::SignUp);
        let second = state.toggle();

        // The sign-up schema arrives after the user already switched
        assert!(!state.schema_loaded(first, Ok(signup_fields())));
        assert!(state.fields.is_empty());
        assert!(state.is_loading());

        assert!(state.schema_loaded(second, Ok(signin_fields())));
        assert_eq!(state.fields, signin_fields());
    }

    #[test]
    fn test_missing_field_never_submits() {
        let mut state = ready(AuthMode::SignUp);
        fill(&mut state, &[("email", "ann@example.com"), ("password", "secret")]);

        assert!(state.begin_submit().is_none());
        assert_eq!(state.error.as_deref(), Some("Please fill out all required fields."));
        assert_eq!(state.phase, Phase::Ready);
    }

    #[test]
    fn test_sign_in_needs_only_email_and_password() {
        let mut state = ready(AuthMode::SignIn);
        fill(&mut state, &[("email", "ann@example.com"), ("password", "secret")]);

        let (_, submission) = state.begin_submit().unwrap();

        assert_eq!(
            submission,
            Submission::SignIn(SignInRequest {
                email: "ann@example.com".to_string(),
                password: "secret".to_string(),
            })
        );
        assert!(state.is_submitting());
        assert!(!state.can_submit());
    }

    #[test]
    fn test_submit_clears_previous_error() {
        let mut state = ready(AuthMode::SignIn);
        state.error = Some("Invalid credentials".to_string());
        fill(&mut state, &[("email", "ann@example.com"), ("password", "secret")]);

        assert!(state.begin_submit().is_some());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let (mut state, _) = AuthFormState::new(AuthMode::SignIn);
        fill(&mut state, &[("email", "ann@example.com"), ("password", "secret")]);

        assert!(state.begin_submit().is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_sign_up_success_switches_to_sign_in() {
        let mut state = ready(AuthMode::SignUp);
        fill(
            &mut state,
            &[("name", "Ann"), ("email", "ann@example.com"), ("password", "secret")],
        );
        let (ticket, submission) = state.begin_submit().unwrap();
        assert!(matches!(submission, Submission::SignUp(ref r) if r.name == "Ann"));

        let follow_up = state.submit_finished(
            ticket,
            SubmitOutcome::SignedUp {
                identifier: "ann@example.com".to_string(),
            },
        );

        let FollowUp::ConfirmSignUp(schema_ticket) = follow_up else {
            panic!("expected sign-up confirmation, got {follow_up:?}");
        };
        assert_eq!(state.mode, AuthMode::SignIn);
        assert_eq!(state.inputs, InputValues::default());
        assert!(state.error.is_none());
        assert!(!state.is_submitting());

        assert!(state.schema_loaded(schema_ticket, Ok(signin_fields())));
        assert!(state.can_submit());
    }

    #[test]
    fn test_rejection_keeps_mode_and_inputs() {
        let mut state = ready(AuthMode::SignIn);
        fill(&mut state, &[("email", "ann@example.com"), ("password", "wrong")]);
        let (ticket, _) = state.begin_submit().unwrap();

        let follow_up = state.submit_finished(
            ticket,
            SubmitOutcome::Rejected("Invalid credentials".to_string()),
        );

        assert_eq!(follow_up, FollowUp::Nothing);
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(state.mode, AuthMode::SignIn);
        assert_eq!(state.inputs.get("password"), "wrong");
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_transport_failure_uses_generic_message() {
        let mut state = ready(AuthMode::SignUp);
        fill(
            &mut state,
            &[("name", "Ann"), ("email", "ann@example.com"), ("password", "secret")],
        );
        let (ticket, _) = state.begin_submit().unwrap();

        state.submit_finished(ticket, SubmitOutcome::Failed);

        assert_eq!(state.error.as_deref(), Some(SUBMIT_FAILED_MESSAGE));
        assert_eq!(state.mode, AuthMode::SignUp);
        assert_eq!(state.phase, Phase::Ready);
    }

    #[test]
    fn test_sign_in_success_redirects_with_user() {
        let mut state = ready(AuthMode::SignIn);
        fill(&mut state, &[("email", "ann@example.com"), ("password", "secret")]);
        let (ticket, _) = state.begin_submit().unwrap();

        let follow_up = state.submit_finished(ticket, SubmitOutcome::SignedIn(None));

        assert_eq!(follow_up, FollowUp::Redirect(None));
        assert_eq!(state.inputs, InputValues::default());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_submission_finishing_after_toggle_is_discarded() {
        let mut state = ready(AuthMode::SignIn);
        fill(&mut state, &[("email", "ann@example.com"), ("password", "wrong")]);
        let (ticket, _) = state.begin_submit().unwrap();

        let schema_ticket = state.toggle();
        assert!(state.schema_loaded(schema_ticket, Ok(signup_fields())));

        let follow_up = state.submit_finished(
            ticket,
            SubmitOutcome::Rejected("Invalid credentials".to_string()),
        );

        assert_eq!(follow_up, FollowUp::Nothing);
        assert_eq!(state.mode, AuthMode::SignUp);
        assert!(state.error.is_none());
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_old_submission_leaves_newer_one_in_flight() {
        let mut state = ready(AuthMode::SignIn);
        fill(&mut state, &[("email", "ann@example.com"), ("password", "wrong")]);
        let (first, _) = state.begin_submit().unwrap();

        // Switch away and back, then send again before the first answer
        state.toggle();
        let schema_ticket = state.toggle();
        assert!(state.schema_loaded(schema_ticket, Ok(signin_fields())));
        fill(&mut state, &[("email", "ann@example.com"), ("password", "secret")]);
        let (second, _) = state.begin_submit().unwrap();

        assert_eq!(state.submit_finished(first, SubmitOutcome::Failed), FollowUp::Nothing);
        assert!(state.is_submitting());
        assert!(!state.can_submit());
        assert!(state.error.is_none());

        let follow_up = state.submit_finished(second, SubmitOutcome::SignedIn(None));
        assert_eq!(follow_up, FollowUp::Redirect(None));
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_request_generation() {
        let mut generation = RequestGeneration::default();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_eq!(generation.current(), second);
    }

    #[test]
    fn test_input_values_missing() {
        let mut inputs = InputValues::default();
        inputs.set("email", "ann@example.com");
        inputs.set("name", "");

        assert_eq!(inputs.missing(AuthMode::SignUp), vec!["password", "name"]);
        assert_eq!(inputs.missing(AuthMode::SignIn), vec!["password"]);
        assert_eq!(inputs.get("unknown"), "");
    }
}
