//! Test transports: a scripted mock and an in-memory JSON REST backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::config::ApiConfig;

pub(crate) const TEST_BASE_URL: &str = "http://backend.test";

pub(crate) fn client_with<T: Transport>(transport: T) -> ApiClient<T> {
    let config = ApiConfig::new(TEST_BASE_URL).expect("test base url should parse");
    ApiClient::new(&config, transport)
}

pub(crate) fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("application/json; charset=utf-8".to_owned()),
        body: body.to_string(),
    }
}

pub(crate) fn text_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse { status, content_type: Some("text/plain".to_owned()), body: body.to_owned() }
}

// =============================================================================
// MockTransport
// =============================================================================

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<Vec<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
        Self { responses: Mutex::new(responses), requests: Mutex::new(Vec::new()) }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("mock mutex should lock").clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("at least one request should be recorded")
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().expect("mock mutex should lock").push(request);
        let mut responses = self.responses.lock().expect("mock mutex should lock");
        if responses.is_empty() {
            Ok(json_response(200, &json!({})))
        } else {
            responses.remove(0)
        }
    }
}

// =============================================================================
// MemoryBackend
// =============================================================================

/// Minimal in-memory REST backend: numeric ids, equality filters, and
/// inclusive `_gte`/`_lte` range filters on list endpoints.
#[derive(Default)]
pub(crate) struct MemoryBackend {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_collection(self, name: &str, records: Vec<Value>) -> Self {
        self.collections
            .lock()
            .expect("backend mutex should lock")
            .insert(name.to_owned(), records);
        self
    }

    pub(crate) fn records(&self, name: &str) -> Vec<Value> {
        self.collections
            .lock()
            .expect("backend mutex should lock")
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().expect("backend mutex should lock").len()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .expect("backend mutex should lock")
            .last()
            .cloned()
            .expect("at least one request should be recorded")
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let rest = request.url.strip_prefix(TEST_BASE_URL).unwrap_or(&request.url);
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let mut collections = self.collections.lock().expect("backend mutex should lock");

        match (request.method, segments.as_slice()) {
            (HttpMethod::Get, [name]) => {
                let filters: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
                let records = collections.get(*name).cloned().unwrap_or_default();
                let matching: Vec<Value> =
                    records.into_iter().filter(|r| matches_filters(r, &filters)).collect();
                json_response(200, &Value::Array(matching))
            }
            (HttpMethod::Post, [name]) => {
                let mut record: Value =
                    serde_json::from_str(request.body.as_deref().unwrap_or("{}")).unwrap_or(json!({}));
                let records = collections.entry((*name).to_owned()).or_default();
                let next_id = records.iter().filter_map(|r| r["id"].as_u64()).max().unwrap_or(0) + 1;
                record["id"] = json!(next_id);
                records.push(record.clone());
                json_response(201, &record)
            }
            (method, [name, id]) => {
                let Some(records) = collections.get_mut(*name) else {
                    return json_response(404, &json!({}));
                };
                let Some(pos) = records.iter().position(|r| r["id"].to_string() == *id) else {
                    return json_response(404, &json!({}));
                };
                match method {
                    HttpMethod::Get => json_response(200, &records[pos]),
                    HttpMethod::Patch => {
                        let patch: Value =
                            serde_json::from_str(request.body.as_deref().unwrap_or("{}")).unwrap_or(json!({}));
                        if let (Some(target), Some(fields)) = (records[pos].as_object_mut(), patch.as_object()) {
                            for (k, v) in fields {
                                target.insert(k.clone(), v.clone());
                            }
                        }
                        json_response(200, &records[pos])
                    }
                    HttpMethod::Put => {
                        let mut replacement: Value =
                            serde_json::from_str(request.body.as_deref().unwrap_or("{}")).unwrap_or(json!({}));
                        replacement["id"] = records[pos]["id"].clone();
                        records[pos] = replacement;
                        json_response(200, &records[pos])
                    }
                    HttpMethod::Delete => {
                        records.remove(pos);
                        json_response(200, &json!({}))
                    }
                    HttpMethod::Post => json_response(404, &json!({})),
                }
            }
            _ => json_response(404, &json!({})),
        }
    }
}

#[async_trait(?Send)]
impl Transport for MemoryBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.handle(&request);
        self.requests.lock().expect("backend mutex should lock").push(request);
        Ok(response)
    }
}

/// Transport whose every request fails before reaching a server.
pub(crate) struct UnreachableTransport;

#[async_trait(?Send)]
impl Transport for UnreachableTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Err(ApiError::Transport("connection refused".to_owned()))
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches_filters(record: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(key, expected)| {
        if let Some(field) = key.strip_suffix("_gte") {
            field_text(&record[field]).is_some_and(|v| v.as_str() >= expected.as_str())
        } else if let Some(field) = key.strip_suffix("_lte") {
            field_text(&record[field]).is_some_and(|v| v.as_str() <= expected.as_str())
        } else {
            field_text(&record[key.as_str()]).is_some_and(|v| v == *expected)
        }
    })
}
