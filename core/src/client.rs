//! A transport bundled with the façades.
//!
//! # Design
//! `Client` holds one transport and nothing else; every method forwards to
//! the matching free function in `facade`. Injecting the transport through
//! the constructor keeps tests free of global state, and
//! `Client::new()` falls back to `ReqwestTransport` when none is supplied.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::facade;
use crate::http::{CreateMethod, Headers, RequestDescriptor};
use crate::response::ResponseEnvelope;
use crate::transport::Transport;

#[cfg(feature = "reqwest")]
use crate::transport::ReqwestTransport;

/// CRUD helper over an injected transport.
#[derive(Debug, Clone)]
pub struct Client<Tr> {
    transport: Tr,
}

#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// Default transport with relative targets resolved against `base_url`.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_transport(ReqwestTransport::new().with_base_url(base_url))
    }
}

#[cfg(feature = "reqwest")]
impl Default for Client<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tr: Transport> Client<Tr> {
    pub fn with_transport(transport: Tr) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    pub async fn read<T: DeserializeOwned>(
        &self,
        target: &str,
        headers: Option<Headers>,
    ) -> Result<ResponseEnvelope<T>, Error> {
        facade::read(&self.transport, target, headers).await
    }

    pub async fn head<T: DeserializeOwned>(
        &self,
        target: &str,
        headers: Option<Headers>,
    ) -> Result<ResponseEnvelope<T>, Error> {
        facade::head(&self.transport, target, headers).await
    }

    pub async fn create<T, B>(
        &self,
        method: CreateMethod,
        target: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> Result<ResponseEnvelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        facade::create(&self.transport, method, target, headers, body).await
    }

    pub async fn update<T, B>(
        &self,
        target: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> Result<ResponseEnvelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        facade::update(&self.transport, target, headers, body).await
    }

    pub async fn del<T: DeserializeOwned>(
        &self,
        target: &str,
        headers: Option<Headers>,
    ) -> Result<ResponseEnvelope<T>, Error> {
        facade::del(&self.transport, target, headers).await
    }

    pub async fn del_with_body<T, B>(
        &self,
        target: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> Result<ResponseEnvelope<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        facade::del_with_body(&self.transport, target, headers, body).await
    }

    pub async fn http<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<ResponseEnvelope<T>, Error> {
        facade::http(&self.transport, request).await
    }
}
