//! Staged versions of the façades.
//!
//! Each stage takes one argument and returns the next stage; only the last
//! stage produces a future, and only that future talks to the transport.
//! Intermediate stages are plain values and can be cloned and reused.
//!
//! ```no_run
//! # async fn demo() -> Result<(), crud_core::Error> {
//! use crud_core::{curried, ReqwestTransport, ResponseEnvelope};
//!
//! let transport = ReqwestTransport::new().with_base_url("http://localhost:3000");
//! let people = curried::read(&transport).path("/people");
//! let env: ResponseEnvelope = people.clone().send().await?;
//! # let _ = env;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::facade;
use crate::http::{CreateMethod, Headers, RequestDescriptor};
use crate::response::ResponseEnvelope;
use crate::transport::Transport;

type Parsed<T> = PhantomData<fn() -> T>;

/// `Clone` and `Debug` for a stage, bounded on the transport only. `T` is a
/// marker, so the parsed type never has to implement either.
macro_rules! stage {
    ($($name:ident { $($field:ident),* })*) => {$(
        impl<Tr: Clone, T> Clone for $name<Tr, T> {
            fn clone(&self) -> Self {
                Self {
                    $($field: self.$field.clone(),)*
                    _parsed: PhantomData,
                }
            }
        }

        impl<Tr: fmt::Debug, T> fmt::Debug for $name<Tr, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    $(.field(stringify!($field), &self.$field))*
                    .finish()
            }
        }
    )*};
}

stage! {
    Read { transport }
    ReadAt { transport, target }
    Head { transport }
    HeadAt { transport, target }
    Create { transport }
    CreateAs { transport, method }
    CreateAt { transport, method, target }
    CreateReady { transport, method, target, headers }
    Update { transport }
    UpdateAt { transport, target }
    UpdateReady { transport, target, headers }
    Del { transport }
    DelAt { transport, target }
    DelReady { transport, target, headers }
    Http { transport }
}

pub fn read<T, Tr: Transport>(transport: Tr) -> Read<Tr, T> {
    Read {
        transport,
        _parsed: PhantomData,
    }
}

pub struct Read<Tr, T> {
    transport: Tr,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> Read<Tr, T> {
    pub fn path(self, target: impl Into<String>) -> ReadAt<Tr, T> {
        ReadAt {
            transport: self.transport,
            target: target.into(),
            _parsed: PhantomData,
        }
    }
}

pub struct ReadAt<Tr, T> {
    transport: Tr,
    target: String,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> ReadAt<Tr, T> {
    pub async fn headers(self, headers: Headers) -> Result<ResponseEnvelope<T>, Error> {
        facade::read(&self.transport, &self.target, Some(headers)).await
    }

    pub async fn send(self) -> Result<ResponseEnvelope<T>, Error> {
        facade::read(&self.transport, &self.target, None).await
    }
}

pub fn head<T, Tr: Transport>(transport: Tr) -> Head<Tr, T> {
    Head {
        transport,
        _parsed: PhantomData,
    }
}

pub struct Head<Tr, T> {
    transport: Tr,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> Head<Tr, T> {
    pub fn path(self, target: impl Into<String>) -> HeadAt<Tr, T> {
        HeadAt {
            transport: self.transport,
            target: target.into(),
            _parsed: PhantomData,
        }
    }
}

pub struct HeadAt<Tr, T> {
    transport: Tr,
    target: String,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> HeadAt<Tr, T> {
    pub async fn headers(self, headers: Headers) -> Result<ResponseEnvelope<T>, Error> {
        facade::head(&self.transport, &self.target, Some(headers)).await
    }

    pub async fn send(self) -> Result<ResponseEnvelope<T>, Error> {
        facade::head(&self.transport, &self.target, None).await
    }
}

/// Order: transport, method, path, headers, body.
pub fn create<T, Tr: Transport>(transport: Tr) -> Create<Tr, T> {
    Create {
        transport,
        _parsed: PhantomData,
    }
}

pub struct Create<Tr, T> {
    transport: Tr,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> Create<Tr, T> {
    pub fn method(self, method: CreateMethod) -> CreateAs<Tr, T> {
        CreateAs {
            transport: self.transport,
            method,
            _parsed: PhantomData,
        }
    }
}

pub struct CreateAs<Tr, T> {
    transport: Tr,
    method: CreateMethod,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> CreateAs<Tr, T> {
    pub fn path(self, target: impl Into<String>) -> CreateAt<Tr, T> {
        CreateAt {
            transport: self.transport,
            method: self.method,
            target: target.into(),
            _parsed: PhantomData,
        }
    }
}

pub struct CreateAt<Tr, T> {
    transport: Tr,
    method: CreateMethod,
    target: String,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> CreateAt<Tr, T> {
    pub fn headers(self, headers: Headers) -> CreateReady<Tr, T> {
        CreateReady {
            transport: self.transport,
            method: self.method,
            target: self.target,
            headers: Some(headers),
            _parsed: PhantomData,
        }
    }

    /// Skip the headers stage and use the JSON default.
    pub async fn body<B: Serialize + ?Sized>(self, body: &B) -> Result<ResponseEnvelope<T>, Error> {
        facade::create(&self.transport, self.method, &self.target, None, body).await
    }
}

pub struct CreateReady<Tr, T> {
    transport: Tr,
    method: CreateMethod,
    target: String,
    headers: Option<Headers>,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> CreateReady<Tr, T> {
    pub async fn body<B: Serialize + ?Sized>(self, body: &B) -> Result<ResponseEnvelope<T>, Error> {
        facade::create(&self.transport, self.method, &self.target, self.headers, body).await
    }
}

/// Order: transport, path, headers, body.
pub fn update<T, Tr: Transport>(transport: Tr) -> Update<Tr, T> {
    Update {
        transport,
        _parsed: PhantomData,
    }
}

pub struct Update<Tr, T> {
    transport: Tr,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> Update<Tr, T> {
    pub fn path(self, target: impl Into<String>) -> UpdateAt<Tr, T> {
        UpdateAt {
            transport: self.transport,
            target: target.into(),
            _parsed: PhantomData,
        }
    }
}

pub struct UpdateAt<Tr, T> {
    transport: Tr,
    target: String,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> UpdateAt<Tr, T> {
    pub fn headers(self, headers: Headers) -> UpdateReady<Tr, T> {
        UpdateReady {
            transport: self.transport,
            target: self.target,
            headers: Some(headers),
            _parsed: PhantomData,
        }
    }

    pub async fn body<B: Serialize + ?Sized>(self, body: &B) -> Result<ResponseEnvelope<T>, Error> {
        facade::update(&self.transport, &self.target, None, body).await
    }
}

pub struct UpdateReady<Tr, T> {
    transport: Tr,
    target: String,
    headers: Option<Headers>,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> UpdateReady<Tr, T> {
    pub async fn body<B: Serialize + ?Sized>(self, body: &B) -> Result<ResponseEnvelope<T>, Error> {
        facade::update(&self.transport, &self.target, self.headers, body).await
    }
}

/// Order: transport, path, headers, body. `send` on either of the last two
/// stages fills the remaining arguments with their defaults.
pub fn del<T, Tr: Transport>(transport: Tr) -> Del<Tr, T> {
    Del {
        transport,
        _parsed: PhantomData,
    }
}

pub struct Del<Tr, T> {
    transport: Tr,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> Del<Tr, T> {
    pub fn path(self, target: impl Into<String>) -> DelAt<Tr, T> {
        DelAt {
            transport: self.transport,
            target: target.into(),
            _parsed: PhantomData,
        }
    }
}

pub struct DelAt<Tr, T> {
    transport: Tr,
    target: String,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> DelAt<Tr, T> {
    pub fn headers(self, headers: Headers) -> DelReady<Tr, T> {
        DelReady {
            transport: self.transport,
            target: self.target,
            headers: Some(headers),
            _parsed: PhantomData,
        }
    }

    pub async fn send(self) -> Result<ResponseEnvelope<T>, Error> {
        facade::del(&self.transport, &self.target, None).await
    }
}

pub struct DelReady<Tr, T> {
    transport: Tr,
    target: String,
    headers: Option<Headers>,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> DelReady<Tr, T> {
    pub async fn body<B: Serialize + ?Sized>(self, body: &B) -> Result<ResponseEnvelope<T>, Error> {
        facade::del_with_body(&self.transport, &self.target, self.headers, body).await
    }

    pub async fn send(self) -> Result<ResponseEnvelope<T>, Error> {
        facade::del(&self.transport, &self.target, self.headers).await
    }
}

/// Order: transport, request.
pub fn http<T, Tr: Transport>(transport: Tr) -> Http<Tr, T> {
    Http {
        transport,
        _parsed: PhantomData,
    }
}

pub struct Http<Tr, T> {
    transport: Tr,
    _parsed: Parsed<T>,
}

impl<Tr: Transport, T: DeserializeOwned> Http<Tr, T> {
    pub async fn request(self, request: RequestDescriptor) -> Result<ResponseEnvelope<T>, Error> {
        facade::http(&self.transport, request).await
    }
}
