//! Convenience CRUD façades over an injected HTTP transport.
//!
//! # Overview
//! `read`, `head`, `create`, `update`, `del` (and `del_with_body`) and `http` build a
//! `RequestDescriptor`, hand it to a `Transport`, and materialize the reply
//! into a `ResponseEnvelope`. The transport owns all network concerns; the
//! crate itself performs no I/O.
//!
//! # Design
//! - The transport is passed explicitly (free functions) or injected once
//!   (`Client`). There is no global client.
//! - A success response only gets a parsed body when it can safely have
//!   one: never for `HEAD`, never for 204, never without `Content-Type`.
//! - Non-2xx responses fail with `Error::Http`, displayed as the status text.
//! - `curried` offers the same operations as staged builders; nothing is
//!   sent until the last argument is supplied and the future is awaited.

pub mod client;
pub mod curried;
pub mod error;
pub mod facade;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;

pub use client::Client;
pub use error::{Error, Result, TransportError};
pub use facade::{create, del, del_with_body, head, http, read, update};
pub use http::{CreateMethod, Headers, HttpMethod, RawResponse, RequestDescriptor};
pub use request::RequestBuilder;
pub use response::{materialize, ResponseEnvelope};
pub use transport::{transport_fn, FnTransport, Transport};

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
