//! # client
//!
//! Leptos + WASM front end of InstaShare: login, user management and
//! document management pages over the `api` crate's Service Layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The same component tree renders on the server (`ssr`) and hydrates in the
//! browser (`hydrate`). Everything that touches the network, `localStorage`
//! or `window.location` is gated on `hydrate`; during server render the auth
//! state stays unresolved, so guarded routes render their placeholder.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
