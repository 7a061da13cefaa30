//! Context-provided client state.

pub mod auth;
pub mod flash;
