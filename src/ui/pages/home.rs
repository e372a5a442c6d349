//! Storefront landing page

use leptos::prelude::*;
use leptos_meta::{Meta, Title};
use leptos_router::components::A;

use crate::ui::icon::{Icon, icons};
use crate::ui::session::use_session_context;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session_context();

    view! {
        <Title text="ClickNCart - Shop your favorite products" />
        <Meta name="description" content="Discover exclusive deals on your favorite products at ClickNCart." />

        <section class="min-h-[calc(100vh-4rem)] flex items-center justify-center bg-gradient-to-br from-indigo-50 to-white px-4">
            <div class="text-center max-w-2xl">
                <Icon name=icons::CART class="w-16 h-16 mx-auto text-indigo-600 mb-6" />
                <h1 class="text-4xl sm:text-5xl font-bold text-gray-900 mb-4 tracking-tight">
                    {move || match session.user().and_then(|user| user.display_name().map(str::to_string)) {
                        Some(name) => format!("Welcome back, {}!", name),
                        None => "Welcome to ClickNCart".to_string(),
                    }}
                </h1>
                <p class="text-lg text-gray-600 mb-8">"Your premium shopping destination awaits"</p>
                <Show when=move || !session.is_loading() && session.user().is_none()>
                    <A
                        href="/auth?type=signup"
                        attr:class="inline-block px-6 py-3 bg-indigo-600 hover:bg-indigo-700 text-white font-medium rounded-lg transition-colors"
                    >
                        "Create an account"
                    </A>
                </Show>
            </div>
        </section>
    }
}
