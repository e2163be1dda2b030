//! Access to the external catalogue: test specs and material search.

mod client;
mod error;
pub mod payload;

pub use client::{build_headers, UpstreamClient, DEFAULT_BASE_URL};
pub use error::FetchError;
