use leptos::prelude::*;

use crate::core::models::{FieldKind, FormFieldDescriptor};

/// Labelled input rendered from a remote field descriptor
#[component]
pub fn SchemaField(
    field: FormFieldDescriptor,
    /// Current value signal
    value: Signal<String>,
    /// Input event callback
    on_input: Callback<String>,
    /// Whether field is disabled
    #[prop(into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let id = format!("field-{}", field.marker);
    let autocomplete = match field.kind() {
        FieldKind::Secret => "current-password",
        FieldKind::Text => "on",
    };

    view! {
        <div class="space-y-1.5">
            <label for=id.clone() class="block text-sm font-medium text-gray-700">
                {field.title().to_string()}
            </label>
            <input
                id=id
                name=field.marker.clone()
                type=field.kind().input_type()
                autocomplete=autocomplete
                placeholder=field.placeholder()
                class="w-full px-3 py-2 border border-gray-300 rounded-lg
                       text-gray-900 placeholder-gray-400
                       focus:outline-none focus:ring-2 focus:ring-indigo-500 focus:border-transparent
                       disabled:bg-gray-100 transition-colors"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                disabled=move || disabled.get()
            />
        </div>
    }
}
