//! Authenticated dashboard shell and its index view.
//!
//! SYSTEM CONTEXT
//! ==============
//! `DashboardLayout` is the parent route of every private page. It renders the
//! route guard around the sidebar, the header and the nested outlet, so child
//! pages never run (and never fetch) for an anonymous visitor. It also owns
//! the [`Flash`] that carries success messages across action navigations.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Outlet;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::navbar::Navbar;
use crate::components::sidebar::Sidebar;
use crate::state::flash::Flash;
use crate::util::auth::RouteGuard;

#[component]
pub fn DashboardLayout() -> impl IntoView {
    let flash = Flash::new();
    provide_context(flash);

    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(path) = flash.take_target() {
            navigate(path, NavigateOptions::default());
        }
    });
    let location = use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        flash.on_route(&path);
    });

    view! {
        <RouteGuard>
            <div class="dashboard-page">
                <Sidebar/>
                <div class="dashboard-page__main">
                    <Navbar/>
                    <Show when=move || flash.message.get().is_some()>
                        <p class="flash">
                            {move || flash.message.get().unwrap_or_default()}
                            <button class="flash__close" title="Dismiss" on:click=move |_| flash.dismiss()>
                                "✕"
                            </button>
                        </p>
                    </Show>
                    <main class="dashboard-page__content">
                        <Outlet/>
                    </main>
                </div>
            </div>
        </RouteGuard>
    }
}

#[component]
pub fn DashboardHome() -> impl IntoView {
    view! { <p class="dashboard-page__hint">"Select an option from the sidebar"</p> }
}
