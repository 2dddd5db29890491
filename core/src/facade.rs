//! One async function per HTTP verb.
//!
//! Each façade builds a `RequestDescriptor`, sends it through the given
//! transport and materializes the response. Passing `None` for `headers`
//! applies the verb's default set: `Content-Type: application/json` for every
//! verb except `del`, whose default is empty.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::http::{CreateMethod, Headers, HttpMethod, RequestDescriptor};
use crate::request::RequestBuilder;
use crate::response::{materialize, ResponseEnvelope};
use crate::transport::Transport;

/// `GET target`.
pub async fn read<T, Tr>(
    transport: &Tr,
    target: &str,
    headers: Option<Headers>,
) -> Result<ResponseEnvelope<T>, Error>
where
    T: DeserializeOwned,
    Tr: Transport + ?Sized,
{
    let request = RequestBuilder::new(target)
        .method(HttpMethod::Get)
        .headers(headers.unwrap_or_else(Headers::json))
        .build()?;
    http(transport, request).await
}

/// `HEAD target`. The envelope never carries a parsed body.
pub async fn head<T, Tr>(
    transport: &Tr,
    target: &str,
    headers: Option<Headers>,
) -> Result<ResponseEnvelope<T>, Error>
where
    T: DeserializeOwned,
    Tr: Transport + ?Sized,
{
    let request = RequestBuilder::new(target)
        .method(HttpMethod::Head)
        .headers(headers.unwrap_or_else(Headers::json))
        .build()?;
    http(transport, request).await
}

/// `PUT` to a known URI or `POST` to a collection URI, with `body` as JSON.
pub async fn create<T, Tr, B>(
    transport: &Tr,
    method: CreateMethod,
    target: &str,
    headers: Option<Headers>,
    body: &B,
) -> Result<ResponseEnvelope<T>, Error>
where
    T: DeserializeOwned,
    Tr: Transport + ?Sized,
    B: Serialize + ?Sized,
{
    let request = RequestBuilder::new(target)
        .method(method)
        .headers(headers.unwrap_or_else(Headers::json))
        .json(body)?
        .build()?;
    http(transport, request).await
}

/// `PUT target` with `body` as JSON.
pub async fn update<T, Tr, B>(
    transport: &Tr,
    target: &str,
    headers: Option<Headers>,
    body: &B,
) -> Result<ResponseEnvelope<T>, Error>
where
    T: DeserializeOwned,
    Tr: Transport + ?Sized,
    B: Serialize + ?Sized,
{
    let request = RequestBuilder::new(target)
        .method(HttpMethod::Put)
        .headers(headers.unwrap_or_else(Headers::json))
        .json(body)?
        .build()?;
    http(transport, request).await
}

/// `DELETE target` with no headers by default and `{}` as the body.
pub async fn del<T, Tr>(
    transport: &Tr,
    target: &str,
    headers: Option<Headers>,
) -> Result<ResponseEnvelope<T>, Error>
where
    T: DeserializeOwned,
    Tr: Transport + ?Sized,
{
    del_with_body(transport, target, headers, &serde_json::Map::new()).await
}

/// `DELETE target` with `body` as JSON.
pub async fn del_with_body<T, Tr, B>(
    transport: &Tr,
    target: &str,
    headers: Option<Headers>,
    body: &B,
) -> Result<ResponseEnvelope<T>, Error>
where
    T: DeserializeOwned,
    Tr: Transport + ?Sized,
    B: Serialize + ?Sized,
{
    let request = RequestBuilder::new(target)
        .method(HttpMethod::Delete)
        .headers(headers.unwrap_or_default())
        .json(body)?
        .build()?;
    http(transport, request).await
}

/// Send `request` unchanged and materialize the response.
pub async fn http<T, Tr>(
    transport: &Tr,
    request: RequestDescriptor,
) -> Result<ResponseEnvelope<T>, Error>
where
    T: DeserializeOwned,
    Tr: Transport + ?Sized,
{
    let method = request.method;
    tracing::debug!(%method, target = %request.target, "dispatching request");
    let response = transport.send(request).await?;
    materialize(method, response)
}
