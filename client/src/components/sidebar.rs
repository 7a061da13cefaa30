//! Dashboard navigation links.

use leptos::prelude::*;
use leptos_router::components::A;

/// Sidebar entries in display order.
pub const LINKS: [(&str, &str); 4] = [
    ("/dashboard", "Dashboard"),
    ("/dashboard/users", "List Users"),
    ("/dashboard/my-documents", "My Documents"),
    ("/dashboard/upload-document", "Upload Document"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            <h2 class="sidebar__title">"InstaShare"</h2>
            <ul class="sidebar__links">
                {LINKS
                    .iter()
                    .map(|(href, label)| {
                        view! {
                            <li>
                                <A href=*href attr:class="sidebar__link">{*label}</A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
