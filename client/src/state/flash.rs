//! Success message carried across a navigation.
//!
//! An action whose [`Notice`] names a target route hands the message to the
//! dashboard layout, which navigates and keeps showing it on the next page.
//! Notices without a target stay inline on the page that produced them.
//! A carried message lasts until the route changes away from its target.

#[cfg(test)]
#[path = "flash_test.rs"]
mod flash_test;

use api::actions::Notice;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct Flash {
    pub message: RwSignal<Option<String>>,
    pub target: RwSignal<Option<&'static str>>,
    /// Route the current message belongs to.
    shown_at: RwSignal<Option<&'static str>>,
}

impl Flash {
    pub fn new() -> Self {
        Self { message: RwSignal::new(None), target: RwSignal::new(None), shown_at: RwSignal::new(None) }
    }

    pub fn show(self, notice: Notice, inline: RwSignal<Option<String>>) {
        match notice.navigate_to {
            Some(path) => {
                self.message.set(Some(notice.message));
                self.shown_at.set(Some(path));
                self.target.set(Some(path));
            }
            None => inline.set(Some(notice.message)),
        }
    }

    /// Pending navigation target, cleared once taken.
    pub fn take_target(self) -> Option<&'static str> {
        let target = self.target.get();
        if target.is_some() {
            self.target.set(None);
        }
        target
    }

    pub fn dismiss(self) {
        self.message.set(None);
        self.shown_at.set(None);
    }

    /// Called on every route change; drops a message once the user has
    /// moved past the page it was carried to.
    pub fn on_route(self, path: &str) {
        let Some(shown_at) = self.shown_at.get_untracked() else {
            return;
        };
        if path.trim_end_matches('/') != shown_at {
            self.dismiss();
        }
    }
}

impl Default for Flash {
    fn default() -> Self {
        Self::new()
    }
}
