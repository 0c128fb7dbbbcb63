//! Thin HTTP layer over `reqwest`.
//!
//! Responses are read fully into a [`Response`] holding plain owned data, so callers
//! can inspect status and body after the connection is gone and futures stay `Send`.

use std::collections::HashMap;
use std::fmt;

use log::trace;

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Canonical reason phrase of the status code, empty when unknown.
    pub fn status_text(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("")
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure: the request never produced a response.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP error: {}", self.message)
    }
}

impl std::error::Error for HttpError {}

pub type HttpResult<T> = Result<T, HttpError>;

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Set a header. Names are case-insensitive; a later value replaces an earlier one.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        for (name, value) in headers {
            self = self.header(name, value);
        }
        self
    }

    /// Append URL query parameters. Values are URL-encoded when sent.
    pub fn query(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers
            .entry("content-type".to_owned())
            .or_insert_with(|| "application/json".to_owned());
        Ok(self)
    }

    pub async fn send(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();

        let mut request = match self.method {
            Method::Get => client.get(&self.url),
            Method::Post => client.post(&self.url),
            Method::Put => client.put(&self.url),
            Method::Delete => client.delete(&self.url),
        };

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        if let Some(body) = self.body {
            request = request.body(body);
        }

        trace!("{} {}", self.method, self.url);
        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?
            .to_vec();

        Ok(Response { status, body })
    }
}

/// Entry point for building requests.
///
/// ```ignore
/// let response = Client::request(Method::Post, "https://api.example.com/api/admin/user/list")
///     .header("Authorization", "Bearer token")
///     .json(&params)?
///     .send()
///     .await?;
/// ```
pub struct Client;

impl Client {
    pub fn request(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &[u8]) -> Response {
        Response {
            status,
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_response_is_success() {
        assert!(response(200, b"").is_success());
        assert!(response(204, b"").is_success());
        assert!(!response(404, b"").is_success());
    }

    #[test]
    fn test_status_text() {
        assert_eq!(response(500, b"").status_text(), "Internal Server Error");
        assert_eq!(response(401, b"").status_text(), "Unauthorized");
        assert_eq!(response(599, b"").status_text(), "");
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct TestData {
            message: String,
        }

        let data: TestData = response(200, br#"{"message": "hello"}"#).json().unwrap();
        assert_eq!(data.message, "hello");
    }

    #[test]
    fn test_request_builder_headers_merge_case_insensitively() {
        let builder = Client::request(Method::Post, "https://example.com")
            .header("Content-Type", "application/json")
            .headers([("content-type".to_owned(), "text/plain".to_owned())])
            .header("Authorization", "Bearer token");

        assert_eq!(
            builder.headers.get("content-type"),
            Some(&"text/plain".to_owned())
        );
        assert_eq!(
            builder.headers.get("authorization"),
            Some(&"Bearer token".to_owned())
        );
    }

    #[test]
    fn test_request_builder_json_keeps_explicit_content_type() {
        let builder = Client::request(Method::Post, "https://example.com")
            .header("Content-Type", "application/vnd.api+json")
            .json(&serde_json::json!({"a": 1}))
            .unwrap();

        assert_eq!(
            builder.headers.get("content-type"),
            Some(&"application/vnd.api+json".to_owned())
        );
        assert_eq!(builder.body.as_deref(), Some(br#"{"a":1}"#.as_slice()));
    }
}
