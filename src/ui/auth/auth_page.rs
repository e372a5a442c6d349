//! Sign-up / sign-in page
//!
//! The form fields come from the commerce backend's form schema, so the page
//! renders whatever descriptors the schema lists. Transitions are delegated to
//! [`AuthFormState`]; this component only wires events and requests to it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use super::field::SchemaField;
use super::form_state::{AuthFormState, FollowUp, Phase, Submission, SubmitOutcome, Ticket};
use crate::core::models::AuthMode;
use crate::ui::api::{self, ApiReply};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::{Toast, use_toaster};
use crate::ui::session::use_session_context;

pub const SIGN_UP_TOAST_TITLE: &str = "User has been created";
pub const SIGN_UP_TOAST_DESCRIPTION: &str = "Please enter your credentials to log in.";

/// Texts that change with the form mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTexts {
    pub heading: &'static str,
    pub subtitle: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub toggle_prompt: &'static str,
    pub toggle_action: &'static str,
}

impl ModeTexts {
    pub fn for_mode(mode: AuthMode) -> Self {
        match mode {
            AuthMode::SignUp => ModeTexts {
                heading: "Sign Up",
                subtitle: "Join ClickNCart today and discover exclusive deals on your favorite products!",
                submit: "Sign Up",
                submitting: "Creating Account...",
                toggle_prompt: "Already a member?",
                toggle_action: "Sign in",
            },
            AuthMode::SignIn => ModeTexts {
                heading: "Sign In",
                subtitle: "Welcome back to ClickNCart! Log in to continue your shopping journey.",
                submit: "Sign In",
                submitting: "Signing In...",
                toggle_prompt: "Don't have an account?",
                toggle_action: "Sign up",
            },
        }
    }
}

/// Send a validated submission and classify the answer
async fn submit(submission: Submission) -> SubmitOutcome {
    let outcome = match submission {
        Submission::SignUp(request) => api::sign_up(&request).await.map(|reply| match reply {
            ApiReply::Accepted(created) => SubmitOutcome::SignedUp {
                identifier: created.identifier,
            },
            ApiReply::Rejected(message) => SubmitOutcome::Rejected(message),
        }),
        Submission::SignIn(request) => api::sign_in(&request).await.map(|reply| match reply {
            ApiReply::Accepted(signed_in) => SubmitOutcome::SignedIn(signed_in.user),
            ApiReply::Rejected(message) => SubmitOutcome::Rejected(message),
        }),
    };

    outcome.unwrap_or_else(|err| {
        leptos::logging::warn!("Auth request failed: {}", err);
        SubmitOutcome::Failed
    })
}

/// Address to replace the current one with when the form shows `mode`
/// but the `type` query parameter selects another
pub fn query_rewrite(query_type: Option<&str>, mode: AuthMode) -> Option<String> {
    (AuthMode::from_query(query_type) != mode).then(|| mode.auth_href())
}

/// Authentication page at `/auth`
#[component]
pub fn AuthPage() -> impl IntoView {
    let session = use_session_context();
    let toaster = use_toaster();
    let navigate = use_navigate();
    let query = use_query_map();

    let mode_in_query = move || query.with(|q| AuthMode::from_query(q.get("type").as_deref()));

    // The first render already uses the mode from the URL
    let (initial, first_ticket) = AuthFormState::new(query.with_untracked(|q| {
        AuthMode::from_query(q.get("type").as_deref())
    }));
    let form = RwSignal::new(initial);

    let mode = Memo::new(move |_| form.with(|s| s.mode));
    let phase = Memo::new(move |_| form.with(|s| s.phase));
    let error = Memo::new(move |_| form.with(|s| s.error.clone()));
    let fields = Memo::new(move |_| form.with(|s| s.fields.clone()));
    let can_submit = Memo::new(move |_| form.with(|s| s.can_submit()));
    let submitting = Signal::derive(move || phase.get() == Phase::Submitting);
    let texts = move || ModeTexts::for_mode(mode.get());

    let load_schema = move |ticket: Ticket, mode: AuthMode| {
        spawn_local(async move {
            let result = api::fetch_form_fields(mode).await;
            if let Err(err) = &result {
                leptos::logging::warn!("Failed to load {} form: {}", mode.slug(), err);
            }
            form.update(|s| {
                s.schema_loaded(ticket, result);
            });
        });
    };

    let enter_mode = move |next: AuthMode| {
        if let Some(ticket) = form.try_update(|s| s.enter_mode(next)) {
            load_schema(ticket, next);
        }
    };

    // Initial schema load, then follow later changes of `?type=`
    Effect::new(move |previous: Option<AuthMode>| {
        let requested = mode_in_query();
        match previous {
            None => load_schema(first_ticket, form.with_untracked(|s| s.mode)),
            Some(previous) if previous != requested => {
                if form.with_untracked(|s| s.mode) != requested {
                    enter_mode(requested);
                }
            }
            Some(_) => {}
        }
        requested
    });

    // Keep `?type=` on the shown mode so a link to the other mode is a change
    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            let mode = mode.get();
            let rewrite = query.with_untracked(|q| query_rewrite(q.get("type").as_deref(), mode));
            if let Some(href) = rewrite {
                navigate(
                    &href,
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
        }
    });

    let on_toggle = move |_| {
        let next = form.with_untracked(|s| s.mode.toggled());
        enter_mode(next);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let Some((ticket, submission)) = form.try_update(|s| s.begin_submit()).flatten() else {
            return;
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = submit(submission).await;
            let follow_up = form
                .try_update(|s| s.submit_finished(ticket, outcome))
                .unwrap_or(FollowUp::Nothing);

            match follow_up {
                FollowUp::Nothing => {}
                FollowUp::ConfirmSignUp(schema_ticket) => {
                    toaster.push(Toast::success(SIGN_UP_TOAST_TITLE, SIGN_UP_TOAST_DESCRIPTION));
                    load_schema(schema_ticket, AuthMode::SignIn);
                }
                FollowUp::Redirect(user) => {
                    session.sign_in(user);
                    navigate("/", Default::default());
                }
            }
        });
    };

    view! {
        <div class="min-h-[calc(100vh-4rem)] flex bg-gray-50">
            // Illustration
            <div class="hidden lg:flex lg:w-1/2 items-center justify-center bg-gradient-to-br from-indigo-600 to-purple-600 p-12">
                <div class="text-center text-white space-y-4">
                    <Icon name=icons::CART class="w-24 h-24 mx-auto opacity-90" />
                    <h2 class="text-3xl font-bold">"Welcome to ClickNCart"</h2>
                    <p class="text-lg text-indigo-100">"Your premium shopping destination awaits"</p>
                </div>
            </div>

            <div class="flex-1 flex items-center justify-center px-4 py-12">
                <div class="w-full max-w-md bg-white rounded-xl shadow-lg p-8 border border-gray-200">
                    <form on:submit=on_submit class="space-y-6">
                        <div class="text-center">
                            <h1 class="text-2xl font-bold text-gray-900">{move || texts().heading}</h1>
                            <p class="mt-2 text-sm text-gray-600">{move || texts().subtitle}</p>
                        </div>

                        {move || {
                            error.get().map(|error| view! {
                                <div class="flex items-start gap-2 p-3 bg-red-50 border border-red-200 rounded-lg" role="alert">
                                    <Icon name=icons::ALERT_CIRCLE class="w-5 h-5 text-red-500 shrink-0" />
                                    <p class="text-sm text-red-700">{error}</p>
                                </div>
                            })
                        }}

                        <Show
                            when=move || phase.get() != Phase::Loading
                            fallback=|| view! {
                                <div class="flex items-center justify-center gap-2 py-8 text-gray-500">
                                    <Icon name=icons::LOADER class="w-5 h-5 animate-spin" />
                                    <span class="text-sm">"Loading form..."</span>
                                </div>
                            }
                        >
                            <div class="space-y-4">
                                <For
                                    each=move || fields.get()
                                    key=|field| field.marker.clone()
                                    children=move |field| {
                                        let marker = field.marker.clone();
                                        let value = {
                                            let marker = marker.clone();
                                            Signal::derive(move || form.with(|s| s.inputs.get(&marker).to_string()))
                                        };
                                        let on_input = Callback::new(move |input: String| {
                                            form.update(|s| s.set_input(marker.clone(), input));
                                        });
                                        view! {
                                            <SchemaField
                                                field=field
                                                value=value
                                                on_input=on_input
                                                disabled=submitting
                                            />
                                        }
                                    }
                                />
                            </div>
                        </Show>

                        <button
                            type="submit"
                            class="w-full py-2.5 px-4 bg-indigo-600 hover:bg-indigo-700
                                   text-white font-medium rounded-lg
                                   focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-indigo-500
                                   disabled:opacity-50 disabled:cursor-not-allowed
                                   transition-colors"
                            disabled=move || !can_submit.get()
                        >
                            {move || {
                                if submitting.get() {
                                    view! {
                                        <span class="flex items-center justify-center">
                                            <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4 text-white" />
                                            {texts().submitting}
                                        </span>
                                    }.into_any()
                                } else {
                                    view! { <span class="block">{texts().submit}</span> }.into_any()
                                }
                            }}
                        </button>

                        <div class="text-center text-sm text-gray-600">
                            {move || texts().toggle_prompt}
                            " "
                            <button
                                type="button"
                                class="text-indigo-600 hover:text-indigo-700 font-medium"
                                on:click=on_toggle
                            >
                                {move || texts().toggle_action}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texts_per_mode() {
        let sign_up = ModeTexts::for_mode(AuthMode::SignUp);
        assert_eq!(sign_up.heading, "Sign Up");
        assert_eq!(sign_up.submitting, "Creating Account...");
        assert_eq!(sign_up.toggle_prompt, "Already a member?");
        assert_eq!(sign_up.toggle_action, "Sign in");

        let sign_in = ModeTexts::for_mode(AuthMode::SignIn);
        assert_eq!(sign_in.heading, "Sign In");
        assert_eq!(sign_in.submitting, "Signing In...");
        assert_eq!(sign_in.toggle_prompt, "Don't have an account?");
        assert_eq!(sign_in.toggle_action, "Sign up");
    }

    #[test]
    fn test_query_follows_mode_after_sign_up() {
        // Signed up from `?type=signup`; the form now shows sign-in
        assert_eq!(
            query_rewrite(Some("signup"), AuthMode::SignIn).as_deref(),
            Some("/auth?type=login")
        );
        // The navbar's Sign Up link then differs from the rewritten query
        assert_ne!(
            AuthMode::from_query(Some("signup")),
            AuthMode::from_query(Some(AuthMode::SignIn.query_value()))
        );
    }

    #[test]
    fn test_matching_query_is_left_alone() {
        assert_eq!(query_rewrite(Some("login"), AuthMode::SignIn), None);
        assert_eq!(query_rewrite(Some("signup"), AuthMode::SignUp), None);
        assert_eq!(query_rewrite(None, AuthMode::SignUp), None);
        assert_eq!(
            query_rewrite(None, AuthMode::SignIn).as_deref(),
            Some("/auth?type=login")
        );
    }

    #[test]
    fn test_subtitles_mention_the_store() {
        for mode in [AuthMode::SignUp, AuthMode::SignIn] {
            assert!(ModeTexts::for_mode(mode).subtitle.contains("ClickNCart"));
        }
    }
}
