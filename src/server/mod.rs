//! HTTP API module.
//!
//! Exposes catalogue search, rendered test answers and the password-gated
//! credential editor over JSON.

pub mod api;
mod routes;
mod server;

pub use routes::ApiError;
pub use server::{app, run, AppState, SharedState};
