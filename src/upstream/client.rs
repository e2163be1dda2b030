//! HTTP client for the catalogue service.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::payload::{filter_special, parse_search, parse_test, search_body};
use super::FetchError;
use crate::credentials::Credentials;
use crate::models::{SearchItem, Test};

pub const DEFAULT_BASE_URL: &str = "https://uchebnik.mos.ru";

const ACCEPT_VALUE: &str = "application/json, text/plain, */*";
const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the test-spec and material-search endpoints.
///
/// Holds no credentials: every call receives the ones to send.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base_url: String,
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("catalogue-answers/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one test spec.
    ///
    /// Rejected credentials and non-success statuses are errors. Transport
    /// and decoding failures are logged and produce [`Test::empty`].
    pub async fn fetch_test(&self, credentials: &Credentials, test_id: i64) -> Result<Test, FetchError> {
        ensure_configured(credentials)?;

        let url = format!("{}/webtests/exam/rest/secure/spec/{}", self.base_url, test_id);
        debug!(test_id, "fetching test spec");

        let response = match self.authorized(self.http.get(&url), credentials).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(test_id, error = %err, "test fetch failed");
                return Ok(Test::empty());
            }
        };
        check_status(response.status())?;

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!(test_id, error = %err, "test spec was not JSON");
                return Ok(Test::empty());
            }
        };

        match parse_test(&body) {
            Some(test) => {
                info!(test_id, tasks = test.tasks.len(), "fetched test \"{}\"", test.name);
                Ok(test)
            }
            None => {
                warn!(test_id, "test spec is missing its name or tasks");
                Ok(Test::empty())
            }
        }
    }

    /// Searches the catalogue and keeps only answer-bearing tests.
    pub async fn search(&self, credentials: &Credentials, query: &str) -> Result<Vec<SearchItem>, FetchError> {
        ensure_configured(credentials)?;

        let url = format!("{}/search/api/v3/materials", self.base_url);
        debug!(query, "searching catalogue");

        let request = self
            .authorized(self.http.post(&url), credentials)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(&search_body(query));

        let response = request.send().await?;
        check_status(response.status())?;

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!(query, error = %err, "search response was not JSON");
                return Ok(Vec::new());
            }
        };

        let items = parse_search(&body);
        let total = items.len();
        let kept = filter_special(items);
        info!(query, total, kept = kept.len(), "catalogue search finished");

        Ok(kept)
    }

    fn authorized(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request.headers(build_headers(credentials))
    }
}

/// Credential headers plus the default `Accept`.
///
/// Values that are not valid header text are skipped with a warning.
pub fn build_headers(credentials: &Credentials) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in credentials.headers() {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = name, "skipping header with invalid characters"),
        }
    }

    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers
}

fn ensure_configured(credentials: &Credentials) -> Result<(), FetchError> {
    if credentials.is_configured() {
        Ok(())
    } else {
        Err(FetchError::NotConfigured)
    }
}

fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(FetchError::Unauthorized);
    }
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::{HeaderMap as AxumHeaders, StatusCode as AxumStatus};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    #[derive(Clone, Default)]
    struct Seen {
        headers: Arc<Mutex<Vec<(String, String)>>>,
        body: Arc<Mutex<Option<Value>>>,
    }

    fn record(seen: &Seen, headers: &AxumHeaders) {
        let mut stored = seen.headers.lock().unwrap();
        stored.clear();
        for (name, value) in headers {
            stored.push((name.to_string(), value.to_str().unwrap_or("").to_string()));
        }
    }

    async fn spec(
        State(seen): State<Seen>,
        Path(id): Path<i64>,
        headers: AxumHeaders,
    ) -> Result<Json<Value>, AxumStatus> {
        record(&seen, &headers);
        match id {
            401 => Err(AxumStatus::UNAUTHORIZED),
            500 => Err(AxumStatus::INTERNAL_SERVER_ERROR),
            404 => Ok(Json(json!({"unexpected": true}))),
            _ => Ok(Json(json!({
                "basic_info": {"name": "Biology"},
                "test_groups": [{"tasks": [
                    {"test_task": {"question_elements": [{"text": "Largest organ?"}],
                                   "answer": {"type": "answer/single",
                                              "options": [{"id": "o1", "text": "Skin"}],
                                              "right_answer": {"id": "o1"}}}}
                ]}]
            }))),
        }
    }

    async fn materials(
        State(seen): State<Seen>,
        headers: AxumHeaders,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        record(&seen, &headers);
        *seen.body.lock().unwrap() = Some(body);
        Json(json!({"data": [
            {"id": 11, "name": "Kept", "tags": [{"name": "ЦДЗ", "type": "special"}]},
            {"id": 12, "name": "Dropped", "tags": []}
        ]}))
    }

    async fn mock_upstream() -> (String, Seen) {
        let seen = Seen::default();
        let app = Router::new()
            .route("/webtests/exam/rest/secure/spec/:id", get(spec))
            .route("/search/api/v3/materials", post(materials))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), seen)
    }

    fn creds() -> Credentials {
        Credentials {
            user_id: "17".to_string(),
            authorization: "Bearer abc".to_string(),
            ..Credentials::default()
        }
    }

    fn header(seen: &Seen, name: &str) -> Option<String> {
        seen.headers
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    #[test]
    fn test_build_headers_skips_empty_fields() {
        let headers = build_headers(&creds());
        assert_eq!(headers.get("user-id").unwrap(), "17");
        assert_eq!(headers.get("authorization").unwrap(), "Bearer abc");
        assert!(headers.get("profile-id").is_none());
        assert_eq!(headers.get(ACCEPT).unwrap(), ACCEPT_VALUE);
    }

    #[tokio::test]
    async fn test_fetch_test() {
        let (base, seen) = mock_upstream().await;
        let client = UpstreamClient::new(base).unwrap();

        let test = client.fetch_test(&creds(), 7).await.unwrap();
        assert_eq!(test.name, "Biology");
        assert_eq!(test.tasks.len(), 1);
        assert_eq!(header(&seen, "authorization").as_deref(), Some("Bearer abc"));
        assert_eq!(header(&seen, "user-id").as_deref(), Some("17"));
        assert!(header(&seen, "profile").is_none());
    }

    #[tokio::test]
    async fn test_fetch_test_errors() {
        let (base, _) = mock_upstream().await;
        let client = UpstreamClient::new(base).unwrap();

        assert!(matches!(
            client.fetch_test(&creds(), 401).await,
            Err(FetchError::Unauthorized)
        ));
        assert!(matches!(
            client.fetch_test(&creds(), 500).await,
            Err(FetchError::Status(500))
        ));
        assert!(matches!(
            client.fetch_test(&Credentials::default(), 7).await,
            Err(FetchError::NotConfigured)
        ));

        let malformed = client.fetch_test(&creds(), 404).await.unwrap();
        assert!(malformed.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_test_unreachable_is_empty() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UpstreamClient::new(format!("http://{}", addr)).unwrap();
        let test = client.fetch_test(&creds(), 1).await.unwrap();
        assert!(test.is_empty());
    }

    #[tokio::test]
    async fn test_search_filters_and_sends_body() {
        let (base, seen) = mock_upstream().await;
        let client = UpstreamClient::new(format!("{}/", base)).unwrap();

        let items = client.search(&creds(), "cells").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].display_name(), "Kept");

        let body = seen.body.lock().unwrap().clone().unwrap();
        assert_eq!(body["query"]["search"], "cells");
        assert_eq!(
            header(&seen, "content-type").as_deref(),
            Some(JSON_CONTENT_TYPE)
        );
    }
}
