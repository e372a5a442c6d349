use leptos::prelude::*;
use leptos_meta::{Link, MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::ui::auth::AuthPage;
use crate::ui::navbar::Navbar;
use crate::ui::notifications::{Toasts, provide_toaster};
use crate::ui::pages::{HomePage, NotFoundPage};
use crate::ui::session::provide_session_context;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body class="bg-gray-50 text-gray-900 antialiased">
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Shared by the navbar and every page
    provide_session_context();
    provide_toaster();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/clickncart.css"/>
        <Link rel="icon" type_="image/svg+xml" href="/favicon.svg"/>

        <Title text="ClickNCart"/>

        <Router>
            <Navbar/>
            <main>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/auth") view=AuthPage/>
                </Routes>
            </main>
            <Toasts/>
        </Router>
    }
}
