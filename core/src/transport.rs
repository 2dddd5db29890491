//! The injected transport capability.
//!
//! # Design
//! The façades never touch the network: they hand a `RequestDescriptor` to a
//! `Transport` and materialize whatever comes back. Connection handling, TLS,
//! redirects, retries and timeouts all belong to the transport.
//!
//! `ReqwestTransport` is the default implementation. Tests substitute a
//! closure through `transport_fn` or any other `Transport` impl.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{RawResponse, RequestDescriptor};

/// Executes one HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}

/// A `Transport` backed by a plain async function. See `transport_fn`.
#[derive(Clone)]
pub struct FnTransport<F>(F);

/// Wrap `f` so it can be used wherever a `Transport` is expected.
pub fn transport_fn<F, Fut>(f: F) -> FnTransport<F>
where
    F: Fn(RequestDescriptor) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RawResponse, TransportError>> + Send + 'static,
{
    FnTransport(f)
}

#[async_trait]
impl<F, Fut> Transport for FnTransport<F>
where
    F: Fn(RequestDescriptor) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RawResponse, TransportError>> + Send + 'static,
{
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
        (self.0)(request).await
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use async_trait::async_trait;
    use bytes::Bytes;

    use super::Transport;
    use crate::error::TransportError;
    use crate::http::{Headers, HttpMethod, RawResponse, RequestDescriptor};

    /// Default transport over a shared `reqwest::Client`.
    ///
    /// Relative targets (starting with `/`) are joined onto `base_url` when
    /// one is configured; absolute URLs are used as given.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
        base_url: Option<String>,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn from_client(client: reqwest::Client) -> Self {
            Self {
                client,
                base_url: None,
            }
        }

        pub fn with_base_url(mut self, base_url: &str) -> Self {
            self.base_url = Some(base_url.trim_end_matches('/').to_string());
            self
        }

        pub fn base_url(&self) -> Option<&str> {
            self.base_url.as_deref()
        }

        fn resolve(&self, target: &str) -> String {
            match &self.base_url {
                Some(base) if target.starts_with('/') => format!("{base}{target}"),
                _ => target.to_string(),
            }
        }
    }

    fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }

    /// The reason phrase the server sent. hyper only records it when it
    /// differs from the canonical one, so fall back to that otherwise.
    fn status_text(response: &reqwest::Response) -> String {
        match response.extensions().get::<hyper::ext::ReasonPhrase>() {
            Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
            None => response.status().canonical_reason().unwrap_or_default().to_string(),
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
            let url = self.resolve(&request.target);
            tracing::debug!(method = %request.method, %url, "sending request");

            let mut builder = self.client.request(to_reqwest_method(request.method), url);
            for (name, value) in request.headers.iter() {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(TransportError::new)?;
            let status = response.status();
            let status_text = status_text(&response);
            let headers: Headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = if request.method == HttpMethod::Head {
                Bytes::new()
            } else {
                response.bytes().await.map_err(TransportError::new)?
            };

            Ok(RawResponse {
                status: status.as_u16(),
                status_text,
                headers,
                body,
            })
        }
    }

}
