//! Site navigation bar
//!
//! Brand link, product search, cart link and session controls, with a drawer
//! that repeats them on small screens.

mod mobile_menu;
mod state;
mod user_menu;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::{Toast, use_toaster};
use crate::ui::session::{logout, use_session_context};
use mobile_menu::MobileMenu;
pub use state::{MenuEvent, MenuState, search_href};
pub use user_menu::{UserAvatar, UserMenu};

const LOGOUT_FAILED_TITLE: &str = "Logout failed";
const LOGOUT_FAILED_DESCRIPTION: &str = "Please try again.";

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session_context();
    let toaster = use_toaster();
    let menu = RwSignal::new(MenuState::default());
    let query = RwSignal::new(String::new());

    let mobile_panel = NodeRef::<leptos::html::Div>::new();
    let mobile_toggle = NodeRef::<leptos::html::Button>::new();
    let dropdown = NodeRef::<leptos::html::Div>::new();

    let apply = move |event: MenuEvent| {
        let current = menu.get_untracked();
        let next = current.apply(event);
        if next != current {
            menu.set(next);
        }
    };

    let navigate = use_navigate();

    let on_search = Callback::new({
        let navigate = navigate.clone();
        move |_: ()| {
            if let Some(href) = query.with_untracked(|q| search_href(q)) {
                navigate(&href, Default::default());
                apply(MenuEvent::SearchSubmitted);
            }
        }
    });

    let on_logout = Callback::new(move |_: ()| {
        let navigate = navigate.clone();
        spawn_local(async move {
            match logout(session).await {
                Ok(()) => {
                    apply(MenuEvent::LoggedOut);
                    navigate("/", Default::default());
                }
                Err(err) => {
                    leptos::logging::warn!("Logout failed: {}", err);
                    toaster.push(Toast::error(LOGOUT_FAILED_TITLE, LOGOUT_FAILED_DESCRIPTION));
                }
            }
        });
    });

    // Close open menus when a pointer goes down elsewhere on the page
    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::pointerdown;
        use leptos::wasm_bindgen::JsCast;

        let handle_pointerdown = window_event_listener(pointerdown, move |ev| {
            let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok()) else {
                return;
            };
            let contains = |node: Option<web_sys::Node>| {
                node.is_some_and(|node| node.contains(Some(&target)))
            };

            let in_mobile_menu = contains(mobile_panel.get_untracked().map(Into::into))
                || contains(mobile_toggle.get_untracked().map(Into::into));
            let in_dropdown = contains(dropdown.get_untracked().map(Into::into));

            apply(MenuEvent::PointerDown {
                in_mobile_menu,
                in_dropdown,
            });
        });

        on_cleanup(move || drop(handle_pointerdown));
    }

    view! {
        <nav class="sticky top-0 z-40 bg-white/80 backdrop-blur-md shadow-sm border-b border-gray-200/50">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex items-center justify-between h-16">
                    <A href="/" attr:class="flex-shrink-0">
                        <span class="text-2xl font-bold bg-gradient-to-r from-purple-600 via-pink-500 to-red-500 bg-clip-text text-transparent">
                            "ClickNCart"
                        </span>
                    </A>

                    // Desktop
                    <div class="hidden md:flex items-center gap-6 flex-1 justify-end max-w-4xl">
                        <div class="flex-1 max-w-md mx-8">
                            <SearchForm query=query on_search=on_search rounded="rounded-full" />
                        </div>

                        <A
                            href="/cart"
                            attr:class="flex items-center justify-center h-10 w-10 rounded-full bg-gray-50 border border-gray-200
                                   text-gray-600 hover:text-purple-600 hover:border-purple-300 transition-colors"
                            attr:aria-label="Cart"
                        >
                            <Icon name=icons::CART class="h-5 w-5" />
                        </A>

                        <UserMenu menu=menu container=dropdown on_logout=on_logout />
                    </div>

                    <div class="md:hidden flex items-center">
                        <button
                            type="button"
                            node_ref=mobile_toggle
                            class="p-2 rounded-full hover:bg-gray-100 transition-colors"
                            aria-label="Toggle mobile menu"
                            aria-expanded=move || menu.get().mobile_open.to_string()
                            on:click=move |_| apply(MenuEvent::ToggleMobile)
                        >
                            {move || {
                                if menu.get().mobile_open {
                                    view! { <Icon name=icons::X class="h-6 w-6 text-gray-600" /> }
                                } else {
                                    view! { <Icon name=icons::MENU class="h-6 w-6 text-gray-600" /> }
                                }
                            }}
                        </button>
                    </div>
                </div>
            </div>

            <MobileMenu
                menu=menu
                panel=mobile_panel
                query=query
                on_search=on_search
                on_logout=on_logout
            />
        </nav>
    }
}

/// Search input submitting through `on_search`
#[component]
pub fn SearchForm(
    query: RwSignal<String>,
    on_search: Callback<()>,
    #[prop(default = "rounded-full")]
    rounded: &'static str,
) -> impl IntoView {
    view! {
        <form
            role="search"
            class="relative"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                on_search.run(());
            }
        >
            <div class="absolute left-3 top-1/2 -translate-y-1/2 text-gray-400 pointer-events-none">
                <Icon name=icons::SEARCH class="h-4 w-4" />
            </div>
            <input
                type="text"
                placeholder="Search products..."
                class=format!(
                    "w-full bg-gray-50 border border-gray-200 pl-10 pr-4 py-2 {} \
                     focus:outline-none focus:ring-2 focus:ring-purple-500/20 focus:border-purple-400 transition-colors",
                    rounded,
                )
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
        </form>
    }
}
