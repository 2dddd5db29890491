//! HTTP exchange types described as plain data.
//!
//! # Design
//! The façades build a `RequestDescriptor` and hand it to an injected
//! transport; the transport answers with a `RawResponse`. Neither type knows
//! anything about sockets, so fakes can be written as ordinary values.
//!
//! All fields use owned types (`String`, `Vec`, `Bytes`) so descriptors can
//! move into transports without lifetime concerns.

use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Methods accepted by the `create` façade.
///
/// `Put` stores the entity at a URI the caller already knows, `Post` hands it
/// to a collection URI and lets the server pick the location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMethod {
    Put,
    Post,
}

impl From<CreateMethod> for HttpMethod {
    fn from(method: CreateMethod) -> Self {
        match method {
            CreateMethod::Put => HttpMethod::Put,
            CreateMethod::Post => HttpMethod::Post,
        }
    }
}

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Ordered header list with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The default header set for verbs that carry JSON.
    pub fn json() -> Self {
        let mut headers = Self::new();
        headers.insert(CONTENT_TYPE, APPLICATION_JSON);
        headers
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`, replacing an existing entry of the same name in
    /// place. New names are appended so insertion order is preserved.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

impl From<Vec<(String, String)>> for Headers {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// An HTTP request described as plain data.
///
/// Produced by `RequestBuilder` and consumed by a `Transport`. The body, when
/// present, is already serialized JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub target: String,
    pub headers: Headers,
    pub body: Option<String>,
}

/// An HTTP response as returned by a transport, before materialization.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub body: Bytes,
}

impl RawResponse {
    /// A response with an empty body and the canonical reason phrase for
    /// `status` as its status text.
    pub fn new(status: u16) -> Self {
        let status_text = ::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self {
            status,
            status_text,
            headers: Headers::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Decode the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(Error::Parse)
    }
}
