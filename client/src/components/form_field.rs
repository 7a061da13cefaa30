//! Labelled text input bound to a draft field.

use leptos::prelude::*;

#[component]
pub fn FormField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(into)] editable: Signal<bool>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            <input
                class="form-field__input"
                type=input_type
                required=required
                prop:value=move || value.get()
                disabled=move || !editable.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </label>
    }
}
