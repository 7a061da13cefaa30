//! User detail, edit and create page (`/dashboard/users/:id`).
//!
//! SYSTEM CONTEXT
//! ==============
//! `:id = new` opens the create form; a numeric id loads that user. The form
//! edits a [`UserDraft`], separate from the last-fetched [`User`], and the
//! fetched copy is replaced only after a successful save. Fetches are
//! sequenced so a response for a previous `:id` never overwrites the current
//! one.

#[cfg(test)]
#[path = "user_detail_test.rs"]
mod user_detail_test;

use api::actions::users::{self, UserDraft};
use api::actions::{Confirmation, Outcome};
use api::sequence::RequestSequence;
use api::types::{Role, User};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::route_id;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::form_field::FormField;
use crate::state::auth::Services;
use crate::state::flash::Flash;

/// What the `:id` parameter selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UserRoute {
    New,
    Existing(i64),
    Invalid,
}

impl UserRoute {
    fn parse(raw: Option<&str>) -> Self {
        if raw == Some(users::NEW_USER_SEGMENT) {
            return Self::New;
        }
        route_id(raw).map_or(Self::Invalid, Self::Existing)
    }
}

/// Action waiting on the confirmation dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingAction {
    Delete,
    AssignRole(Role),
}

impl PendingAction {
    fn prompt(self) -> String {
        match self {
            Self::Delete => users::DELETE_PROMPT.to_owned(),
            Self::AssignRole(role) => users::assign_role_prompt(role),
        }
    }
}

fn page_title(route: UserRoute) -> &'static str {
    match route {
        UserRoute::New => "Create New User",
        UserRoute::Existing(_) | UserRoute::Invalid => "User Details",
    }
}

/// Read/write pair for one draft field.
fn bind(
    draft: RwSignal<UserDraft>,
    get: fn(&UserDraft) -> &String,
    set: fn(&mut UserDraft, String),
) -> (Signal<String>, Callback<String>) {
    (
        Signal::derive(move || draft.with(|d| get(d).clone())),
        Callback::new(move |value: String| draft.update(|d| set(d, value))),
    )
}

#[component]
pub fn UserDetailPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let flash = expect_context::<Flash>();
    let params = use_params_map();
    let route = Memo::new(move |_| UserRoute::parse(params.read().get("id").as_deref()));

    let user = RwSignal::new(None::<User>);
    let draft = RwSignal::new(UserDraft::default());
    let editing = RwSignal::new(false);
    let loading = RwSignal::new(true);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let message = RwSignal::new(None::<String>);
    let pending = RwSignal::new(None::<PendingAction>);
    let selected_role = RwSignal::new(Role::User);

    let sequence = RequestSequence::new();
    let load_services = services.clone();
    Effect::new(move || {
        let current = route.get();
        let ticket = sequence.begin();
        error.set(None);
        message.set(None);
        pending.set(None);
        match current {
            UserRoute::New => {
                user.set(None);
                draft.set(UserDraft::default());
                editing.set(true);
                loading.set(false);
            }
            UserRoute::Invalid => {
                user.set(None);
                loading.set(false);
                error.set(Some(users::LOAD_USER_FAILED.to_owned()));
            }
            UserRoute::Existing(id) => {
                editing.set(false);
                loading.set(true);
                #[cfg(feature = "hydrate")]
                {
                    let services = load_services.clone();
                    leptos::task::spawn_local(async move {
                        let result = users::load_user(&services.api, id).await;
                        if !ticket.is_current() {
                            return;
                        }
                        match result {
                            Ok(loaded) => {
                                draft.set(UserDraft::from_user(&loaded));
                                selected_role.set(loaded.role.as_deref().and_then(Role::parse).unwrap_or(Role::User));
                                user.set(Some(loaded));
                            }
                            Err(e) => error.set(Some(e.message)),
                        }
                        loading.set(false);
                    });
                }
                #[cfg(not(feature = "hydrate"))]
                let _ = (&load_services, id, ticket);
            }
        }
    });

    let save_services = services.clone();
    let on_save = Callback::new(move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = route.get_untracked();
        let submitted = draft.get_untracked();
        let services = save_services.clone();
        busy.set(true);
        error.set(None);
        message.set(None);
        leptos::task::spawn_local(async move {
            match current {
                UserRoute::New => match users::create_user(&services.api, &submitted).await {
                    Ok(notice) => flash.show(notice, message),
                    Err(e) => error.set(Some(e.message)),
                },
                UserRoute::Existing(id) => match users::update_user(&services.api, id, &submitted).await {
                    Ok((saved, notice)) => {
                        draft.set(UserDraft::from_user(&saved));
                        user.set(Some(saved));
                        editing.set(false);
                        flash.show(notice, message);
                    }
                    Err(e) => error.set(Some(e.message)),
                },
                UserRoute::Invalid => {}
            }
            busy.set(false);
        });
    });

    let on_cancel_edit = move |_| {
        if let Some(fetched) = user.get_untracked() {
            draft.set(UserDraft::from_user(&fetched));
        }
        editing.set(false);
        error.set(None);
    };

    let on_answer = Callback::new(move |confirmation: Confirmation| {
        let Some(action) = pending.get_untracked() else {
            return;
        };
        pending.set(None);
        let UserRoute::Existing(id) = route.get_untracked() else {
            return;
        };
        let services = services.clone();
        leptos::task::spawn_local(async move {
            let result = match action {
                PendingAction::Delete => users::delete_user(&services.api, id, confirmation).await,
                PendingAction::AssignRole(role) => users::assign_role(&services.api, id, role, confirmation).await,
            };
            match result {
                Ok(Outcome::Done(notice)) => flash.show(notice, message),
                Ok(Outcome::Cancelled) => {}
                Err(e) => error.set(Some(e.message)),
            }
        });
    });

    let is_new = move || route.get() == UserRoute::New;
    let is_existing = move || matches!(route.get(), UserRoute::Existing(_));
    let editable = Signal::derive(move || editing.get());
    let (name, on_name) = bind(draft, |d| &d.name, |d, v| d.name = v);
    let (email, on_email) = bind(draft, |d| &d.email, |d, v| d.email = v);
    let (phone, on_phone) = bind(draft, |d| &d.phone, |d, v| d.phone = v);
    let (responsability, on_responsability) = bind(draft, |d| &d.responsability, |d, v| d.responsability = v);
    let (password, on_password) = bind(draft, |d| &d.password, |d, v| d.password = v);
    let (confirm, on_confirm) = bind(draft, |d| &d.confirm_password, |d, v| d.confirm_password = v);

    view! {
        <section class="user-detail">
            <h2>{move || page_title(route.get())}</h2>
            <Show when=move || error.get().is_some()>
                <p class="page-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || message.get().is_some()>
                <p class="page-message">{move || message.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading user data..."</p> }>
                <Show when=move || is_new() || user.get().is_some()>
                    <form class="user-detail__form" on:submit=move |ev| on_save.run(ev)>
                        <FormField label="Name:" value=name on_input=on_name editable=editable required=true/>
                        <FormField label="Email:" value=email on_input=on_email input_type="email" editable=editable required=true/>
                        <FormField label="Phone:" value=phone on_input=on_phone input_type="tel" editable=editable/>
                        <FormField
                            label="Responsibility:"
                            value=responsability
                            on_input=on_responsability
                            editable=editable
                            required=is_new()
                        />
                        <Show when=move || editing.get()>
                            <FormField label="Password:" value=password on_input=on_password input_type="password" editable=editable/>
                            <FormField
                                label="Confirm Password:"
                                value=confirm
                                on_input=on_confirm
                                input_type="password"
                                editable=editable
                            />
                        </Show>
                        <div class="user-detail__actions">
                            <Show
                                when=move || editing.get()
                                fallback=move || view! {
                                    <button class="btn" type="button" on:click=move |_| editing.set(true)>"Edit"</button>
                                }
                            >
                                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                    {move || if is_new() { "Create User" } else { "Save" }}
                                </button>
                                <Show when=is_existing>
                                    <button class="btn" type="button" on:click=on_cancel_edit>"Cancel"</button>
                                </Show>
                            </Show>
                        </div>
                    </form>
                </Show>
                <Show when=move || is_existing() && user.get().is_some()>
                    <div class="user-detail__role">
                        <p>{move || format!("Current role: {}", user.get().and_then(|u| u.role).unwrap_or_else(|| "-".to_owned()))}</p>
                        <select
                            class="user-detail__role-select"
                            on:change=move |ev| {
                                if let Some(role) = Role::parse(&event_target_value(&ev)) {
                                    selected_role.set(role);
                                }
                            }
                        >
                            {Role::ALL
                                .into_iter()
                                .map(|role| {
                                    view! {
                                        <option value=role.as_str() selected=move || selected_role.get() == role>
                                            {role.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <button
                            class="btn"
                            type="button"
                            on:click=move |_| pending.set(Some(PendingAction::AssignRole(selected_role.get_untracked())))
                        >
                            "Assign Role"
                        </button>
                    </div>
                    <button class="btn btn--danger" type="button" on:click=move |_| pending.set(Some(PendingAction::Delete))>
                        "Delete User"
                    </button>
                </Show>
            </Show>
            <Show when=move || pending.get().is_some()>
                <ConfirmDialog
                    message=pending.get_untracked().map(PendingAction::prompt).unwrap_or_default()
                    on_answer=on_answer
                />
            </Show>
        </section>
    }
}
