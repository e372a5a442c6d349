//! 404 page

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::icon::{Icon, icons};

/// Rendered for every route the storefront does not know
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-[calc(100vh-4rem)] bg-gray-50 flex flex-col items-center justify-center p-4">
            <div class="text-center">
                <div class="w-24 h-24 mx-auto mb-6 bg-gray-100 rounded-full flex items-center justify-center">
                    <Icon name=icons::PACKAGE class="w-12 h-12 text-gray-400" />
                </div>

                <h1 class="text-6xl font-bold text-gray-900 mb-4">"404"</h1>
                <h2 class="text-2xl font-semibold text-gray-900 mb-2">"Page Not Found"</h2>
                <p class="text-gray-600 mb-8 max-w-md mx-auto">
                    "The page you're looking for doesn't exist or has been moved."
                </p>

                <A
                    href="/"
                    attr:class="px-6 py-3 bg-indigo-600 hover:bg-indigo-700 text-white font-medium rounded-lg transition-colors"
                >
                    "Continue Shopping"
                </A>
            </div>
        </div>
    }
}
