//! Browser networking: the gloo-net transport, `localStorage` session
//! persistence and the wiring that assembles them into services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` and `storage` plug the browser into the `api` crate's seams;
//! `api` builds the session store and the API client the pages use.

pub mod api;
pub mod storage;
pub mod transport;
