use leptos::prelude::*;

/// Stroke icon drawn inline from a fixed set of paths
#[component]
pub fn Icon(
    /// One of the names in [`icons`]
    name: &'static str,
    /// CSS classes for sizing and color
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    view! {
        <svg
            class=class
            fill="none"
            stroke="currentColor"
            viewBox="0 0 24 24"
            aria-hidden="true"
        >
            {icons::paths(name)
                .iter()
                .map(|d| view! {
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=*d />
                })
                .collect_view()}
        </svg>
    }
}

/// Available icons
pub mod icons {
    pub const CART: &str = "cart";
    pub const USER: &str = "user";
    pub const MENU: &str = "menu";
    pub const X: &str = "x";
    pub const SEARCH: &str = "search";
    pub const LOGOUT: &str = "logout";
    pub const LOADER: &str = "loader";
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const CHECK_CIRCLE: &str = "check-circle";
    pub const PACKAGE: &str = "package";

    /// Path data of `name`; unknown names draw nothing
    pub fn paths(name: &str) -> &'static [&'static str] {
        match name {
            CART => &[
                "M3 3h2l.4 2M7 13h10l4-8H5.4M7 13L5.4 5M7 13l-2.293 2.293c-.63.63-.184 1.707.707 1.707H17",
                "M17 21a2 2 0 100-4 2 2 0 000 4zM9 21a2 2 0 100-4 2 2 0 000 4z",
            ],
            USER => &["M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z"],
            MENU => &["M4 6h16M4 12h16M4 18h16"],
            X => &["M6 18L18 6M6 6l12 12"],
            SEARCH => &["M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0z"],
            LOGOUT => &[
                "M17 16l4-4m0 0l-4-4m4 4H7m6 4v1a3 3 0 01-3 3H6a3 3 0 01-3-3V7a3 3 0 013-3h4a3 3 0 013 3v1",
            ],
            LOADER => &["M12 3a9 9 0 109 9"],
            ALERT_CIRCLE => &["M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z"],
            CHECK_CIRCLE => &["M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z"],
            PACKAGE => &["M20 7l-8-4-8 4m16 0l-8 4m8-4v10l-8 4m0-10L4 7m8 4v10M4 7v10l8 4"],
            _ => &[],
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_every_icon_has_paths() {
            for name in [
                CART,
                USER,
                MENU,
                X,
                SEARCH,
                LOGOUT,
                LOADER,
                ALERT_CIRCLE,
                CHECK_CIRCLE,
                PACKAGE,
            ] {
                assert!(!paths(name).is_empty(), "{name} has no path");
            }
            assert!(paths("unknown").is_empty());
        }
    }
}
