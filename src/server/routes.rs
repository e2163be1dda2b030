//! API routes.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info, warn};

use super::api::{ErrorBody, SearchQuery, SearchResponse, TestResponse, ADMIN_PASSWORD_HEADER};
use super::server::SharedState;
use crate::answers::build_transcript;
use crate::credentials::Credentials;
use crate::models::Test;
use crate::upstream::FetchError;

/// Errors surfaced by the handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] FetchError),
    #[error("Unauthorized")]
    AdminDenied,
    #[error("{0}")]
    BadRequest(String),
    #[error("Write error")]
    WriteFailed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Upstream(err) => {
                let status = match &err {
                    FetchError::Unauthorized | FetchError::NotConfigured => StatusCode::UNAUTHORIZED,
                    FetchError::Status(code) => {
                        StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
                    }
                    FetchError::Transport(_) => StatusCode::BAD_GATEWAY,
                };
                (status, Json(ErrorBody::new(err.to_string()))).into_response()
            }
            Self::AdminDenied => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::WriteFailed => (StatusCode::INTERNAL_SERVER_ERROR, "Write error").into_response(),
        }
    }
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/admin/config", get(read_config).post(write_config))
        .route("/api/test/:id", get(test_answers))
        .route("/api/test/:id/transcript", get(test_transcript))
}

async fn search(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let credentials = state.store.read();
    let data = state.client.search(&credentials, &query.name).await.map_err(|err| {
        warn!("search for {:?} failed: {}", query.name, err);
        err
    })?;

    Ok(Json(SearchResponse { data }))
}

async fn read_config(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Credentials>, ApiError> {
    require_admin(&state, &headers)?;
    Ok(Json(state.store.read()))
}

async fn write_config(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    require_admin(&state, &headers)?;

    let credentials: Credentials =
        serde_json::from_slice(&body).map_err(|err| ApiError::BadRequest(err.to_string()))?;

    state.store.write(&credentials).map_err(|err| {
        error!("failed to save credentials: {}", err);
        ApiError::WriteFailed
    })?;

    info!("upstream credentials updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn test_answers(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<TestResponse>, ApiError> {
    let test = load_test(&state, &id).await?;
    Ok(Json(TestResponse::from(&test)))
}

async fn test_transcript(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let test = load_test(&state, &id).await?;
    let transcript = build_transcript(&test);

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        transcript,
    )
        .into_response())
}

async fn load_test(state: &SharedState, id: &str) -> Result<Test, ApiError> {
    let test_id = parse_test_id(id)?;
    let credentials = state.store.read();
    Ok(state.client.fetch_test(&credentials, test_id).await?)
}

fn parse_test_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid testId".to_string()))
}

fn require_admin(state: &SharedState, headers: &HeaderMap) -> Result<(), ApiError> {
    let password = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if state.gate.check(password) {
        Ok(())
    } else {
        warn!("rejected admin request");
        Err(ApiError::AdminDenied)
    }
}
