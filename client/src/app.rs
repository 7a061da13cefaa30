//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::pages::dashboard::{DashboardHome, DashboardLayout};
use crate::pages::document_detail::DocumentDetailPage;
use crate::pages::document_upload::DocumentUploadPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::user_detail::UserDetailPage;
use crate::pages::user_documents::UserDocumentsPage;
use crate::pages::user_list::UserListPage;
use crate::state::auth::provide_auth;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth signal and the service handles, then sets up routing.
/// Everything under `/dashboard` sits behind the route guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_auth();

    view! {
        <Stylesheet id="leptos" href="/pkg/instashare.css"/>
        <Title text="InstaShare"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <ParentRoute path=StaticSegment("dashboard") view=DashboardLayout>
                    <Route path=StaticSegment("") view=DashboardHome/>
                    <Route path=StaticSegment("users") view=UserListPage/>
                    <Route path=(StaticSegment("users"), ParamSegment("id")) view=UserDetailPage/>
                    <Route path=StaticSegment("upload-document") view=DocumentUploadPage/>
                    <Route path=StaticSegment("my-documents") view=UserDocumentsPage/>
                    <Route path=(StaticSegment("documents"), ParamSegment("id")) view=DocumentDetailPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
