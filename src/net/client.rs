//! Base HTTP operations shared by every resource facade.
//!
//! DESIGN
//! ======
//! One `request` path handles all verbs: resolve the endpoint against the
//! configured base URL, merge headers over the JSON default, send through
//! the [`Transport`], map non-2xx to [`ApiError::Status`], and decode JSON
//! bodies. Failures are logged once here and returned unchanged; nothing is
//! retried.
//!
//! Request bodies that fail to serialize are reported as
//! [`ApiError::Encode`] before anything is sent.
//!
//! Responses without a JSON content type (or with an empty body) decode as
//! JSON `null`, so `()`, `Option<_>` and [`serde::de::IgnoredAny`] results
//! come back empty while other result types report [`ApiError::Decode`].

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::auth::AuthApi;
use super::budgets::BudgetApi;
use super::categories::CategoryApi;
use super::error::ApiError;
use super::transactions::TransactionApi;
#[cfg(any(feature = "hydrate", not(target_arch = "wasm32")))]
use super::transport::DefaultTransport;
use super::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::config::ApiConfig;

/// Endpoint hit by [`ApiClient::is_server_running`].
pub const LIVENESS_ENDPOINT: &str = "/categories";

const JSON_CONTENT_TYPE: &str = "application/json";

/// REST client bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

#[cfg(any(feature = "hydrate", not(target_arch = "wasm32")))]
impl ApiClient<DefaultTransport> {
    /// Client over the default transport for the current build target.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config, DefaultTransport::default())
    }
}

impl<T: Transport> ApiClient<T> {
    #[must_use]
    pub fn new(config: &ApiConfig, transport: T) -> Self {
        Self { base_url: config.base_url().to_owned(), transport }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn auth(&self) -> AuthApi<'_, T> {
        AuthApi::new(self)
    }

    #[must_use]
    pub fn transactions(&self) -> TransactionApi<'_, T> {
        TransactionApi::new(self)
    }

    #[must_use]
    pub fn categories(&self) -> CategoryApi<'_, T> {
        CategoryApi::new(self)
    }

    #[must_use]
    pub fn budgets(&self) -> BudgetApi<'_, T> {
        BudgetApi::new(self)
    }

    /// `GET {base}{endpoint}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`], [`ApiError::Status`] or [`ApiError::Decode`].
    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ApiError> {
        self.get_with_headers(endpoint, &[]).await
    }

    /// `GET` with caller headers merged over the defaults.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn get_with_headers<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        headers: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        self.request(HttpMethod::Get, endpoint, None, headers).await
    }

    /// `POST {base}{endpoint}` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post<R, B>(&self, endpoint: &str, body: &B) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post_with_headers(endpoint, body, &[]).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post_with_headers<R, B>(
        &self,
        endpoint: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(HttpMethod::Post, endpoint, body)?;
        self.request(HttpMethod::Post, endpoint, Some(body), headers).await
    }

    /// `PUT {base}{endpoint}` with a JSON body (full replacement).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn put<R, B>(&self, endpoint: &str, body: &B) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.put_with_headers(endpoint, body, &[]).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn put_with_headers<R, B>(
        &self,
        endpoint: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(HttpMethod::Put, endpoint, body)?;
        self.request(HttpMethod::Put, endpoint, Some(body), headers).await
    }

    /// `PATCH {base}{endpoint}` with a JSON body (partial update).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn patch<R, B>(&self, endpoint: &str, body: &B) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch_with_headers(endpoint, body, &[]).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn patch_with_headers<R, B>(
        &self,
        endpoint: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(HttpMethod::Patch, endpoint, body)?;
        self.request(HttpMethod::Patch, endpoint, Some(body), headers).await
    }

    /// `DELETE {base}{endpoint}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn delete<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ApiError> {
        self.delete_with_headers(endpoint, &[]).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn delete_with_headers<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        headers: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        self.request(HttpMethod::Delete, endpoint, None, headers).await
    }

    /// Liveness check: `true` if the backend answered at all, whatever the
    /// status or body. Never fails.
    pub async fn is_server_running(&self) -> bool {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: self.url(LIVENESS_ENDPOINT),
            headers: Vec::new(),
            body: None,
        };
        match self.transport.send(request).await {
            Ok(_) => true,
            Err(e) => {
                leptos::logging::warn!("api server unreachable at {}: {e}", self.base_url);
                false
            }
        }
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<String>,
        headers: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let url = self.url(endpoint);
        let request = HttpRequest { method, url: url.clone(), headers: merge_headers(headers), body };
        let result = match self.transport.send(request).await {
            Ok(resp) => interpret(&resp),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            leptos::logging::error!("api request failed: {method} {url}: {e}");
        }
        result
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

/// Default JSON content type followed by caller headers. Names compare
/// case-insensitively; the last value for a name wins.
pub(crate) fn merge_headers(extra: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut merged = vec![("Content-Type".to_owned(), JSON_CONTENT_TYPE.to_owned())];
    for (name, value) in extra {
        match merged.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = (*value).to_owned(),
            None => merged.push(((*name).to_owned(), (*value).to_owned())),
        }
    }
    merged
}

fn interpret<R: DeserializeOwned>(resp: &HttpResponse) -> Result<R, ApiError> {
    if !resp.is_success() {
        return Err(ApiError::Status { status: resp.status });
    }
    if resp.is_json() && !resp.body.trim().is_empty() {
        Ok(serde_json::from_str(&resp.body)?)
    } else {
        Ok(serde_json::from_value(serde_json::Value::Null)?)
    }
}

fn encode_body<B: Serialize + ?Sized>(method: HttpMethod, endpoint: &str, body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| {
        leptos::logging::error!("api request body encode failed: {method} {endpoint}: {e}");
        ApiError::Encode(e.to_string())
    })
}

/// RFC 3339 UTC timestamp used for client-stamped `createdAt` fields.
#[must_use]
pub fn created_at_now() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}
