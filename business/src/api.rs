//! Authenticated JSON client for the admin backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::http::{Client, Method, Response};
use crate::{ApiError, BusinessConfig, SessionStore};

/// Per-call options for [`ApiClient::call`].
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub method: Method,
    /// Extra headers, applied last: they override `Content-Type` and `Authorization`.
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// URL query parameters.
    pub params: Vec<(String, String)>,
    pub require_auth: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            headers: Vec::new(),
            body: None,
            params: Vec::new(),
            require_auth: true,
        }
    }
}

impl CallOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self {
            method: Method::Post,
            body: Some(body),
            ..Self::default()
        })
    }

    pub fn anonymous(mut self) -> Self {
        self.require_auth = false;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }
}

/// Reachability of the backend as seen by the last request.
#[derive(Debug, Default)]
struct Connectivity {
    offline: AtomicBool,
    reconnects: AtomicU64,
}

/// Cloneable handle shared by every query and mutation.
///
/// Besides sending requests it carries a per-resource invalidation counter:
/// mutations bump it and queries compare it to decide their cache is dirty.
/// A reconnect counter works the same way for requests that get through after a
/// network failure.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Arc<BusinessConfig>,
    sessions: SessionStore,
    invalidations: Arc<Mutex<HashMap<&'static str, u64>>>,
    connectivity: Arc<Connectivity>,
}

impl ApiClient {
    pub fn new(config: BusinessConfig, sessions: SessionStore) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            invalidations: Arc::new(Mutex::new(HashMap::new())),
            connectivity: Arc::default(),
        }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn is_authenticated(&self) -> bool {
        self.sessions.is_authenticated()
    }

    /// Marks every cached page of `resource` dirty.
    pub fn invalidate(&self, resource: &'static str) {
        let mut map = self
            .invalidations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *map.entry(resource).or_default() += 1;
        debug!("Invalidated {resource}");
    }

    pub fn invalidation_epoch(&self, resource: &str) -> u64 {
        self.invalidations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(resource)
            .copied()
            .unwrap_or_default()
    }

    /// Whether the last request failed to reach the backend.
    pub fn is_offline(&self) -> bool {
        self.connectivity.offline.load(Ordering::SeqCst)
    }

    /// Bumped each time a request gets a response after a network failure.
    pub fn reconnect_epoch(&self) -> u64 {
        self.connectivity.reconnects.load(Ordering::SeqCst)
    }

    pub(crate) fn record_network_failure(&self) {
        if !self.connectivity.offline.swap(true, Ordering::SeqCst) {
            warn!("Backend unreachable at {}", self.config.api_url());
        }
    }

    pub(crate) fn record_response(&self) {
        if self.connectivity.offline.swap(false, Ordering::SeqCst) {
            self.connectivity.reconnects.fetch_add(1, Ordering::SeqCst);
            info!("Backend reachable again");
        }
    }

    /// Sends one request and decodes the JSON response.
    ///
    /// Fails with [`ApiError::Unauthenticated`] before touching the network when the
    /// call needs a token and there is none. Non-2xx responses become
    /// [`ApiError::Http`]. There is no retry at this level.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint_url(endpoint);
        let method = options.method;

        let token = if options.require_auth {
            match self.sessions.token() {
                Some(token) => Some(token),
                None => {
                    warn!("{method} {url} skipped: not authenticated");
                    return Err(ApiError::Unauthenticated);
                }
            }
        } else {
            None
        };

        let mut request = Client::request(method, &url).header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        request = request.headers(options.headers).query(options.params);
        if let Some(body) = &options.body {
            request = request
                .json(body)
                .map_err(|e| ApiError::Encode(e.to_string()))?;
        }

        let response = request.send().await.map_err(|e| {
            warn!("{method} {url} failed: {e}");
            self.record_network_failure();
            ApiError::Network(e.message)
        })?;
        self.record_response();

        if !response.is_success() {
            let error = error_from_response(&response);
            warn!("{method} {url} -> {}: {error}", response.status);
            return Err(error);
        }

        info!("{method} {url} -> {}", response.status);
        response
            .json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.call(endpoint, CallOptions::post(body)?).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.call(endpoint, CallOptions::get()).await
    }
}

/// Best-effort message extraction from an error body.
///
/// Looks for a top-level `message`, then `error.message`; otherwise falls back to
/// `HTTP <status>: <statusText>`.
pub(crate) fn error_from_response(response: &Response) -> ApiError {
    let body: Option<serde_json::Value> = response.json().ok();
    let message = body.as_ref().and_then(|body| {
        body.get("message")
            .and_then(serde_json::Value::as_str)
            .or_else(|| {
                body.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(serde_json::Value::as_str)
            })
            .map(str::to_owned)
    });

    ApiError::http(
        response.status,
        message.unwrap_or_else(|| {
            format!("HTTP {}: {}", response.status, response.status_text())
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> Response {
        Response {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn message_from_top_level() {
        assert_eq!(
            error_from_response(&response(401, r#"{"message":"Unauthorized"}"#)),
            ApiError::http(401, "Unauthorized")
        );
    }

    #[test]
    fn message_from_envelope_error() {
        assert_eq!(
            error_from_response(&response(
                400,
                r#"{"success":false,"error":{"status":400,"code":"BAD","message":"Bad filter"}}"#
            )),
            ApiError::http(400, "Bad filter")
        );
    }

    #[test]
    fn fallback_for_non_json() {
        assert_eq!(
            error_from_response(&response(502, "<html>bad gateway</html>")),
            ApiError::http(502, "HTTP 502: Bad Gateway")
        );
    }

    #[test]
    fn invalidation_epochs_are_per_resource() {
        let client = ApiClient::new(BusinessConfig::default(), SessionStore::default());

        client.invalidate("livestreams");
        client.invalidate("livestreams");

        assert_eq!(client.invalidation_epoch("livestreams"), 2);
        assert_eq!(client.invalidation_epoch("users"), 0);
    }

    #[test]
    fn reconnect_is_counted_once_per_outage() {
        let client = ApiClient::new(BusinessConfig::default(), SessionStore::default());

        client.record_response();
        assert_eq!(client.reconnect_epoch(), 0);

        client.record_network_failure();
        client.record_network_failure();
        assert!(client.is_offline());
        assert_eq!(client.reconnect_epoch(), 0);

        client.clone().record_response();
        assert!(!client.is_offline());
        assert_eq!(client.reconnect_epoch(), 1);

        client.record_response();
        assert_eq!(client.reconnect_epoch(), 1);
    }

    #[test]
    fn post_options_carry_body() {
        let options = CallOptions::post(&serde_json::json!({"page": 1}))
            .unwrap()
            .anonymous()
            .param("q", "a b");

        assert_eq!(options.method, Method::Post);
        assert!(!options.require_auth);
        assert_eq!(options.params, vec![("q".to_owned(), "a b".to_owned())]);
    }
}
