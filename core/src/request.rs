//! Request descriptor construction.

use serde::Serialize;

use crate::error::Error;
use crate::http::{Headers, HttpMethod, RequestDescriptor};

/// Builds a `RequestDescriptor`.
///
/// Bodies passed through `json` are always serialized with `serde_json`,
/// whatever `Content-Type` the headers declare. Callers that need another
/// encoding pre-encode the payload and use `raw_body`.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Option<HttpMethod>,
    target: String,
    headers: Headers,
    body: Option<String>,
}

impl RequestBuilder {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            method: None,
            target: target.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn method(mut self, method: impl Into<HttpMethod>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Replace the whole header set.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(serde_json::to_string(body).map_err(Error::Serialize)?);
        Ok(self)
    }

    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> Result<RequestDescriptor, Error> {
        let method = self.method.ok_or(Error::MissingMethod)?;
        Ok(RequestDescriptor {
            method,
            target: self.target,
            headers: self.headers,
            body: self.body,
        })
    }
}
