//! Response materialization.
//!
//! # Design
//! A successful response only gets its body parsed when parsing is safe:
//! the request was not `HEAD`, the status is not 204, and the server sent a
//! `Content-Type`. Everything else keeps `parsed_body` as `None`, which is
//! distinct from a body that parsed to `null`, `{}` or `false`. Non-2xx
//! responses become `Error::Http` without their body being read.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::Error;
use crate::http::{Headers, HttpMethod, RawResponse, CONTENT_TYPE};

/// A raw response together with its optionally parsed body.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope<T = serde_json::Value> {
    pub response: RawResponse,
    pub parsed_body: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn status_text(&self) -> &str {
        &self.response.status_text
    }

    pub fn headers(&self) -> &Headers {
        &self.response.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.response.header(name)
    }

    pub fn parsed_body(&self) -> Option<&T> {
        self.parsed_body.as_ref()
    }

    pub fn into_parsed_body(self) -> Option<T> {
        self.parsed_body
    }

    pub fn into_parts(self) -> (RawResponse, Option<T>) {
        (self.response, self.parsed_body)
    }
}

/// Turn a transport response into an envelope, or fail on a non-2xx status.
pub fn materialize<T: DeserializeOwned>(
    method: HttpMethod,
    response: RawResponse,
) -> Result<ResponseEnvelope<T>, Error> {
    if !response.ok() {
        return Err(Error::Http {
            status: response.status,
            status_text: response.status_text,
        });
    }

    let parse = should_parse(method, &response);
    debug!(%method, status = response.status, parse, "materializing response");

    let parsed_body = if parse {
        trace!(len = response.body.len(), "parsing response body");
        Some(response.json::<T>()?)
    } else {
        None
    };

    Ok(ResponseEnvelope {
        response,
        parsed_body,
    })
}

fn should_parse(method: HttpMethod, response: &RawResponse) -> bool {
    method != HttpMethod::Head && response.status != 204 && response.headers.contains(CONTENT_TYPE)
}
