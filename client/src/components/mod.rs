//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome and the confirmation step while
//! reading shared state from Leptos context providers.

pub mod confirm_dialog;
pub mod form_field;
pub mod navbar;
pub mod sidebar;
