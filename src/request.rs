//! Request model inspected by the strategy
//!
//! `BearerRequest` carries what the token locator needs (authorization
//! header, parsed body parameters, parsed query parameters) together with the
//! method, URI and headers so verifiers that ask for the request can look at
//! anything else they need.

use crate::error::Result;
use crate::types::ParamMap;
use axum::http::header::{self, HeaderName};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, Method, Uri};
use serde_json::Value;
use url::form_urlencoded;

/// Body encodings the request model knows how to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/x-www-form-urlencoded`
    Form,
    /// `application/json` or any `+json` media type
    Json,
}

impl BodyKind {
    /// Detect the body encoding from a `Content-Type` header map
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/x-www-form-urlencoded" {
            Some(BodyKind::Form)
        } else if essence == "application/json" || essence.ends_with("+json") {
            Some(BodyKind::Json)
        } else {
            None
        }
    }
}

/// An inbound HTTP request as seen by the bearer strategy
#[derive(Debug, Clone, Default)]
pub struct BearerRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: ParamMap,
    query: ParamMap,
}

impl BearerRequest {
    /// Create a request; query parameters are parsed from the URI
    pub fn new(method: Method, uri: Uri) -> Self {
        let query = uri
            .query()
            .map(|q| parse_params(q.as_bytes()))
            .unwrap_or_default();

        Self {
            method,
            uri,
            query,
            ..Default::default()
        }
    }

    /// Build from request parts and the buffered body bytes
    ///
    /// The body is parsed according to its content type; anything other than
    /// form or JSON encoding leaves the body parameters empty.
    pub fn from_parts(parts: &Parts, body: &[u8]) -> Result<Self> {
        let mut request = Self::new(parts.method.clone(), parts.uri.clone());
        request.headers = parts.headers.clone();

        request.body = match BodyKind::from_headers(&parts.headers) {
            Some(BodyKind::Form) => parse_params(body),
            Some(BodyKind::Json) => parse_json_params(body)?,
            None => ParamMap::new(),
        };

        Ok(request)
    }

    /// Add a header
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the `Authorization` header
    ///
    /// Values that are not valid header values are skipped.
    pub fn with_authorization(mut self, value: impl AsRef<str>) -> Self {
        if let Ok(value) = HeaderValue::from_str(value.as_ref()) {
            self.headers.insert(header::AUTHORIZATION, value);
        }
        self
    }

    /// Add a parsed body parameter
    pub fn with_body_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }

    /// Add a parsed query parameter
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// The `Authorization` header, if present and valid UTF-8
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn body_param(&self, name: &str) -> Option<&str> {
        self.body.get(name).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &ParamMap {
        &self.body
    }

    pub fn query(&self) -> &ParamMap {
        &self.query
    }
}

/// Parse `application/x-www-form-urlencoded` pairs; the first occurrence of a
/// repeated name wins
fn parse_params(input: &[u8]) -> ParamMap {
    let mut params = ParamMap::new();
    for (name, value) in form_urlencoded::parse(input) {
        params
            .entry(name.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// Collect the populated top-level fields of a JSON object body
///
/// Strings are kept as-is. Other truthy values (non-zero numbers, `true`,
/// arrays, objects) are kept as their JSON text; `null`, `false` and `0` are
/// treated as absent. A body that is valid JSON but not an object has no
/// fields.
fn parse_json_params(body: &[u8]) -> Result<ParamMap> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ParamMap::new());
    }

    let value: Value = serde_json::from_slice(body)?;
    let Value::Object(map) = value else {
        return Ok(ParamMap::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(name, value)| json_param(value).map(|v| (name, v)))
        .collect())
}

fn json_param(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
