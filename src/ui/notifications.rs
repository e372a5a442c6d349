//! Toast notifications
//!
//! A [`Toaster`] is provided at the application root; any component can push
//! a toast into it and the [`Toasts`] container renders the queue.

use leptos::prelude::*;
use std::collections::VecDeque;

use crate::ui::icon::{Icon, icons};

/// Maximum number of toasts shown at once
const MAX_TOASTS: usize = 5;

/// Lifetime of a toast unless it says otherwise
pub const DEFAULT_TOAST_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A message shown in the corner of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
    pub duration_ms: u32,
}

impl Toast {
    fn new(kind: ToastKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title, description)
    }

}

/// Toast with the id used to dismiss it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastItem {
    pub id: u64,
    pub toast: Toast,
}

/// Bounded queue of visible toasts, oldest first
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    items: VecDeque<ToastItem>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back(ToastItem { id, toast });

        while self.items.len() > MAX_TOASTS {
            self.items.pop_front();
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|item| item.id != id);
    }

    pub fn items(&self) -> impl Iterator<Item = &ToastItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Handle to the page's toast queue
#[derive(Clone, Copy)]
pub struct Toaster {
    queue: RwSignal<ToastQueue>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn push(&self, toast: Toast) -> u64 {
        let mut id = 0;
        self.queue.update(|queue| id = queue.push(toast));
        id
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|queue| queue.dismiss(id));
    }

    fn visible(&self) -> Vec<ToastItem> {
        self.queue.with(|queue| queue.items().cloned().collect())
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_toaster() -> Toaster {
    let toaster = Toaster::new();
    provide_context(toaster);
    toaster
}

pub fn use_toaster() -> Toaster {
    expect_context::<Toaster>()
}

/// Container rendering the queue; place once at the application root
#[component]
pub fn Toasts() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 w-full max-w-sm" role="status">
            <For
                each=move || toaster.visible()
                key=|item| item.id
                children=move |item| view! { <ToastView item=item toaster=toaster /> }
            />
        </div>
    }
}

#[component]
fn ToastView(item: ToastItem, toaster: Toaster) -> impl IntoView {
    let id = item.id;
    let toast = item.toast;
    let (is_exiting, _set_is_exiting) = signal(false);

    #[cfg(not(feature = "ssr"))]
    {
        use gloo_timers::future::TimeoutFuture;
        use wasm_bindgen_futures::spawn_local;

        let duration_ms = toast.duration_ms;
        spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            _set_is_exiting.set(true);
            // Exit animation
            TimeoutFuture::new(300).await;
            toaster.dismiss(id);
        });
    }

    let (container_class, icon_name, icon_class) = match toast.kind {
        ToastKind::Success => (
            "bg-white border-green-200",
            icons::CHECK_CIRCLE,
            "w-5 h-5 text-green-500",
        ),
        ToastKind::Error => (
            "bg-white border-red-200",
            icons::ALERT_CIRCLE,
            "w-5 h-5 text-red-500",
        ),
    };

    view! {
        <div
            class=format!(
                "flex items-start gap-3 p-4 rounded-lg border shadow-lg transition-all duration-300 {}",
                container_class,
            )
            style=move || {
                if is_exiting.get() {
                    "opacity: 0; transform: translateX(1rem);"
                } else {
                    "opacity: 1; transform: translateX(0);"
                }
            }
        >
            <Icon name=icon_name class=icon_class />
            <div class="flex-1 min-w-0">
                <h4 class="text-sm font-semibold text-gray-900">{toast.title}</h4>
                <p class="text-sm text-gray-600 mt-0.5">{toast.description}</p>
            </div>
            <button
                type="button"
                class="text-gray-400 hover:text-gray-700 transition-colors"
                aria-label="Dismiss"
                on:click=move |_| toaster.dismiss(id)
            >
                <Icon name=icons::X class="w-4 h-4" />
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_defaults_to_five_seconds() {
        let toast = Toast::success("User has been created", "Please log in.");
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.duration_ms, 5000);

        let error = Toast::error("Logout failed", "Please try again.");
        assert_eq!(error.kind, ToastKind::Error);
        assert_eq!(error.duration_ms, DEFAULT_TOAST_DURATION_MS);
    }

    #[test]
    fn test_queue_drops_oldest_beyond_limit() {
        let mut queue = ToastQueue::default();
        for i in 0..7 {
            queue.push(Toast::success(format!("toast {i}"), ""));
        }

        assert_eq!(queue.len(), MAX_TOASTS);
        let titles: Vec<_> = queue.items().map(|item| item.toast.title.as_str()).collect();
        assert_eq!(titles.first(), Some(&"toast 2"));
        assert_eq!(titles.last(), Some(&"toast 6"));
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut queue = ToastQueue::default();
        let first = queue.push(Toast::success("first", ""));
        let second = queue.push(Toast::success("second", ""));
        assert_ne!(first, second);

        queue.dismiss(first);

        let ids: Vec<_> = queue.items().map(|item| item.id).collect();
        assert_eq!(ids, vec![second]);

        queue.dismiss(first);
        assert_eq!(queue.len(), 1);
        queue.dismiss(second);
        assert!(queue.is_empty());
    }
}
