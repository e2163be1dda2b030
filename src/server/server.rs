//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::routes;
use crate::config::Settings;
use crate::credentials::{AdminGate, CredentialStore};
use crate::upstream::{FetchError, UpstreamClient};

/// Application state shared across handlers.
///
/// Credentials are not cached here: handlers read them from the store at
/// the start of every upstream call.
#[derive(Debug)]
pub struct AppState {
    pub client: UpstreamClient,
    pub store: CredentialStore,
    pub gate: AdminGate,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        Ok(Self {
            client: settings.upstream_client()?,
            store: settings.credential_store(),
            gate: settings.admin_gate(),
        })
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(self)
    }
}

/// The full application router.
pub fn app(state: SharedState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve the API on `addr` until the process is stopped.
pub async fn run(settings: &Settings, addr: SocketAddr) -> Result<(), crate::Error> {
    let state = AppState::from_settings(settings)?;

    if !state.gate.is_enabled() {
        warn!("ADMIN_PASSWORD is not set; the admin endpoints will refuse every request");
    }
    if !state.store.read().is_configured() {
        warn!(
            path = %state.store.path().display(),
            "no upstream credentials configured yet"
        );
    }

    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    info!(upstream = state.client.base_url(), "proxying catalogue");

    axum::serve(listener, app(state.into_shared())).await?;
    Ok(())
}
