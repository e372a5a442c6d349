use leptos::prelude::*;
use leptos_router::components::A;

use super::SearchForm;
use super::state::{MenuEvent, MenuState};
use super::user_menu::{AvatarPlaceholder, UserAvatar};
use crate::ui::icon::{Icon, icons};
use crate::ui::session::{SessionState, use_session_context};

const ITEM_CLASS: &str = "flex items-center gap-3 px-4 py-3 rounded-xl text-base font-medium text-gray-600
                          hover:text-white hover:bg-purple-500 transition-colors";

/// Drawer shown below the bar on small screens
#[component]
pub fn MobileMenu(
    menu: RwSignal<MenuState>,
    panel: NodeRef<leptos::html::Div>,
    query: RwSignal<String>,
    on_search: Callback<()>,
    on_logout: Callback<()>,
) -> impl IntoView {
    let session = use_session_context();
    let close = move || menu.update(|m| *m = m.apply(MenuEvent::ItemClicked));

    view! {
        <div
            node_ref=panel
            class="md:hidden bg-white border-t border-gray-200 shadow-lg"
            class:hidden=move || !menu.get().mobile_open
        >
            <div class="px-4 pt-4 pb-3 space-y-3">
                <SearchForm query=query on_search=on_search rounded="rounded-xl" />

                <A href="/cart" on:click=move |_| close() attr:class=ITEM_CLASS>
                    <Icon name=icons::CART class="h-5 w-5" />
                    <span>"Cart"</span>
                </A>
            </div>

            <div class="border-t border-gray-200 pt-4 pb-3">
                {move || match session.state.get() {
                    SessionState::Loading => view! {
                        <div class="flex items-center px-8">
                            <AvatarPlaceholder size=48 />
                        </div>
                    }.into_any(),
                    SessionState::Authenticated(user) => {
                        let name = user.display_name().unwrap_or_default().to_string();
                        let identifier = user.identifier.clone();

                        view! {
                            <div class="flex items-center gap-4 mx-4 mb-4 p-3 bg-purple-50 rounded-xl">
                                <UserAvatar user=user size=48 />
                                <div class="min-w-0">
                                    <div class="text-base font-semibold text-purple-700 truncate">{name}</div>
                                    <div class="text-sm font-medium text-gray-500 truncate">{identifier}</div>
                                </div>
                            </div>
                            <div class="px-4 space-y-2">
                                <A href="/profile" on:click=move |_| close() attr:class=ITEM_CLASS>
                                    <Icon name=icons::USER class="h-5 w-5" />
                                    <span>"Your Profile"</span>
                                </A>
                                <A href="/orders" on:click=move |_| close() attr:class=ITEM_CLASS>
                                    <Icon name=icons::CART class="h-5 w-5" />
                                    <span>"Orders"</span>
                                </A>
                                <button
                                    type="button"
                                    class="w-full flex items-center gap-3 px-4 py-3 rounded-xl text-base font-medium text-gray-600
                                           hover:text-white hover:bg-red-500 transition-colors"
                                    on:click=move |_| on_logout.run(())
                                >
                                    <Icon name=icons::LOGOUT class="h-5 w-5" />
                                    <span>"Log out"</span>
                                </button>
                            </div>
                        }.into_any()
                    }
                    SessionState::Anonymous => view! {
                        <div class="px-4 space-y-2">
                            <A href="/auth?type=login" on:click=move |_| close() attr:class=ITEM_CLASS>
                                <Icon name=icons::USER class="h-5 w-5" />
                                <span>"Login"</span>
                            </A>
                            <A href="/auth?type=signup" on:click=move |_| close() attr:class=ITEM_CLASS>
                                <Icon name=icons::USER class="h-5 w-5" />
                                <span>"Sign Up"</span>
                            </A>
                        </div>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}
