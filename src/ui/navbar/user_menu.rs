//! Desktop session controls
//!
//! Shows a placeholder while the session loads, the avatar dropdown for a
//! signed-in user and the Login / Sign Up links otherwise.

use leptos::prelude::*;
use leptos_router::components::A;

use super::state::{MenuEvent, MenuState};
use crate::core::models::UserSession;
use crate::ui::icon::{Icon, icons};
use crate::ui::session::{SessionState, use_session_context};

const AVATAR_COLORS: [&str; 6] = [
    "bg-purple-500",
    "bg-pink-500",
    "bg-indigo-500",
    "bg-blue-500",
    "bg-teal-500",
    "bg-red-500",
];

/// Background of a user's avatar, stable for a given identifier
pub fn avatar_color(identifier: &str) -> &'static str {
    let hash = identifier
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_add(b as u32));
    AVATAR_COLORS[(hash as usize) % AVATAR_COLORS.len()]
}

#[component]
pub fn UserMenu(
    menu: RwSignal<MenuState>,
    /// Wraps the avatar button and the dropdown panel
    container: NodeRef<leptos::html::Div>,
    on_logout: Callback<()>,
) -> impl IntoView {
    let session = use_session_context();
    let close = move || menu.update(|m| *m = m.apply(MenuEvent::ItemClicked));

    view! {
        <div class="relative" node_ref=container>
            {move || match session.state.get() {
                SessionState::Loading => view! { <AvatarPlaceholder size=40 /> }.into_any(),
                SessionState::Anonymous => view! {
                    <div class="flex items-center gap-3">
                        <A
                            href="/auth?type=login"
                            attr:class="px-5 py-2 text-sm font-semibold text-purple-600 border-2 border-purple-200
                                   hover:border-purple-300 hover:bg-purple-50 rounded-full transition-colors"
                        >
                            "Login"
                        </A>
                        <A
                            href="/auth?type=signup"
                            attr:class="px-5 py-2 text-sm font-semibold text-white bg-purple-600
                                   hover:bg-purple-700 rounded-full shadow-md transition-colors"
                        >
                            "Sign Up"
                        </A>
                    </div>
                }.into_any(),
                SessionState::Authenticated(user) => {
                    let identifier = user.identifier.clone();
                    let name = user.display_name().unwrap_or_default().to_string();

                    view! {
                        <button
                            type="button"
                            class="rounded-full hover:ring-2 hover:ring-purple-500/20 transition-all"
                            aria-label="Open user menu"
                            on:click=move |_| menu.update(|m| *m = m.apply(MenuEvent::ToggleDropdown))
                        >
                            <UserAvatar user=user.clone() size=40 />
                        </button>

                        <Show when=move || menu.get().dropdown_open>
                            <div class="absolute right-0 mt-2 w-64 p-2 bg-white rounded-xl shadow-xl border border-gray-200 z-50">
                                <div class="p-3 mb-2 bg-purple-50 rounded-lg">
                                    <p class="text-sm font-semibold text-purple-700 truncate">{name.clone()}</p>
                                    <p class="text-xs text-gray-500 truncate">{identifier.clone()}</p>
                                </div>
                                <A
                                    href="/profile"
                                    on:click=move |_| close()
                                    attr:class="flex items-center gap-3 px-3 py-2 text-sm font-medium text-gray-700
                                           hover:bg-purple-50 hover:text-purple-700 rounded-lg"
                                >
                                    <Icon name=icons::USER class="h-4 w-4" />
                                    "Profile"
                                </A>
                                <A
                                    href="/orders"
                                    on:click=move |_| close()
                                    attr:class="flex items-center gap-3 px-3 py-2 text-sm font-medium text-gray-700
                                           hover:bg-purple-50 hover:text-purple-700 rounded-lg"
                                >
                                    <Icon name=icons::CART class="h-4 w-4" />
                                    "Orders"
                                </A>
                                <div class="border-t border-gray-200 my-2"></div>
                                <button
                                    type="button"
                                    class="w-full flex items-center gap-3 px-3 py-2 text-sm font-medium text-gray-700
                                           hover:bg-red-50 hover:text-red-700 rounded-lg"
                                    on:click=move |_| on_logout.run(())
                                >
                                    <Icon name=icons::LOGOUT class="h-4 w-4" />
                                    "Log out"
                                </button>
                            </div>
                        </Show>
                    }.into_any()
                }
            }}
        </div>
    }
}

/// Neutral avatar shown until the session is known
#[component]
pub fn AvatarPlaceholder(#[prop(default = 40)] size: u32) -> impl IntoView {
    view! {
        <div
            class="rounded-full bg-gray-300 animate-pulse border-2 border-gray-200"
            style=format!("width: {}px; height: {}px;", size, size)
        ></div>
    }
}

/// Circle with the first letter of the user's name
#[component]
pub fn UserAvatar(
    user: UserSession,
    /// Avatar size in pixels
    #[prop(default = 40)]
    size: u32,
) -> impl IntoView {
    let size_style = format!(
        "width: {}px; height: {}px; min-width: {}px; min-height: {}px;",
        size, size, size, size
    );
    let font_size = if size >= 48 { "text-lg" } else { "text-sm" };
    let color = avatar_color(&user.identifier);

    view! {
        <div
            class=format!("{} rounded-full flex items-center justify-center text-white font-semibold {}", color, font_size)
            style=size_style
        >
            {match user.avatar_initial() {
                Some(initial) => initial.to_string().into_any(),
                None => view! { <Icon name=icons::USER class="w-4 h-4" /> }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_color_is_stable() {
        let first = avatar_color("ann@example.com");
        assert_eq!(first, avatar_color("ann@example.com"));
        assert!(AVATAR_COLORS.contains(&first));
        assert!(AVATAR_COLORS.contains(&avatar_color("")));
    }
}
