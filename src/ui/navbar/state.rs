//! Navbar state that does not touch the DOM

/// Target of a search submission; `None` when the trimmed query is empty
pub fn search_href(query: &str) -> Option<String> {
    let term = query.trim();
    if term.is_empty() {
        return None;
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair("searchTerm", term)
        .finish();
    Some(format!("/search?{}", encoded))
}

/// Open/closed state of the mobile drawer and the user dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub mobile_open: bool,
    pub dropdown_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    ToggleMobile,
    ToggleDropdown,
    /// A link inside a menu was followed
    ItemClicked,
    SearchSubmitted,
    LoggedOut,
    /// Pointer pressed somewhere on the page
    ///
    /// `in_mobile_menu` covers the drawer and its toggle button, `in_dropdown`
    /// covers the avatar button and the dropdown panel.
    PointerDown {
        in_mobile_menu: bool,
        in_dropdown: bool,
    },
}

impl MenuState {
    pub fn apply(self, event: MenuEvent) -> Self {
        match event {
            MenuEvent::ToggleMobile => Self {
                mobile_open: !self.mobile_open,
                ..self
            },
            MenuEvent::ToggleDropdown => Self {
                dropdown_open: !self.dropdown_open,
                ..self
            },
            MenuEvent::ItemClicked | MenuEvent::LoggedOut => Self::default(),
            MenuEvent::SearchSubmitted => Self {
                mobile_open: false,
                ..self
            },
            MenuEvent::PointerDown {
                in_mobile_menu,
                in_dropdown,
            } => Self {
                mobile_open: self.mobile_open && in_mobile_menu,
                dropdown_open: self.dropdown_open && in_dropdown,
            },
        }
    }
}
