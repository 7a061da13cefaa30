//! Platform-neutral core of the InstaShare web client.
//!
//! This crate owns everything the browser app, the SSR host and the CLI share:
//! the wire model of the document API, the endpoint table, the `Transport`
//! seam every HTTP request leaves through, the session store contract and its
//! auth-service implementation, the auth propagation context that mirrors a
//! session into UI state, and the page actions (validation, confirmation,
//! service call, outcome message) that the Leptos pages render.
//!
//! Nothing here touches the DOM or a specific async runtime, so the whole
//! surface is unit-testable against the in-memory doubles in [`testkit`].

pub mod actions;
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod guard;
pub mod sequence;
pub mod session;
pub mod testkit;
pub mod transport;
pub mod types;
pub mod validation;

pub use auth::{AuthContext, AuthPhase, AuthState};
pub use client::ApiClient;
pub use error::{ApiError, AuthError, TransportError};
pub use session::{AuthServiceStore, SessionStore};
pub use transport::{HttpRequest, HttpResponse, Method, RequestBody, Transport};
