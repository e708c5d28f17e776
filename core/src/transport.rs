//! The transport capability the dispatcher drives.
//!
//! # Design
//! A transport performs exactly one HTTP exchange per `fetch` call. It must
//! resolve with a response for any completed exchange, whatever the status
//! code, and reject only when the exchange itself could not happen. Status
//! interpretation and body decoding belong to the dispatcher.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::http::HttpResponse;
use crate::request::RequestConfig;

/// Transport-level failures. The dispatcher reports all of them as
/// `ErrorKind::NetworkFailure`.
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS failure, refused or reset connection
    #[error("connection error: {0}")]
    Connection(String),
    /// The request's abort signal fired before the exchange completed
    #[error("request aborted")]
    Aborted,
    /// The config could not be turned into a request for this transport
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str, config: &RequestConfig) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn fetch(&self, url: &str, config: &RequestConfig) -> Result<HttpResponse, TransportError> {
        (**self).fetch(url, config).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn fetch(&self, url: &str, config: &RequestConfig) -> Result<HttpResponse, TransportError> {
        (**self).fetch(url, config).await
    }
}
