//! Modal yes/no prompt guarding destructive actions.

#[cfg(test)]
#[path = "confirm_dialog_test.rs"]
mod confirm_dialog_test;

use api::actions::Confirmation;
use leptos::prelude::*;

/// Label of the confirming button: destructive prompts get "Delete".
pub fn confirm_label(message: &str) -> &'static str {
    if message.contains("delete") { "Delete" } else { "Confirm" }
}

fn confirm_class(message: &str) -> &'static str {
    if message.contains("delete") { "btn btn--danger" } else { "btn btn--primary" }
}

/// Clicking the backdrop or "Cancel" answers [`Confirmation::Declined`].
#[component]
pub fn ConfirmDialog(#[prop(into)] message: String, on_answer: Callback<Confirmation>) -> impl IntoView {
    let label = confirm_label(&message);
    let class = confirm_class(&message);

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_answer.run(Confirmation::Declined)>
            <div class="dialog" role="alertdialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Please confirm"</h2>
                <p class="dialog__message">{message}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_answer.run(Confirmation::Declined)>
                        "Cancel"
                    </button>
                    <button class=class on:click=move |_| on_answer.run(Confirmation::Confirmed)>
                        {label}
                    </button>
                </div>
            </div>
        </div>
    }
}
