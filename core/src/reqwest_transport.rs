//! Native transport backed by `reqwest`.
//!
//! Browser-only fields of the config (cache, mode, credentials, referrer
//! policy) have no native equivalent and are not sent. A referrer that is an
//! absolute http(s) URL becomes a `Referer` header unless one is already set.

use async_trait::async_trait;

use crate::headers::Headers;
use crate::http::HttpResponse;
use crate::request::RequestConfig;
use crate::transport::{Transport, TransportError};

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    fn prepare(&self, url: &str, config: &RequestConfig) -> Result<reqwest::Request, TransportError> {
        let method = reqwest::Method::from_bytes(config.method.as_str().as_bytes())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let mut builder = self.inner.request(method, url);
        for (name, value) in config.headers.iter() {
            builder = builder.header(name, value);
        }
        if is_absolute_http_url(&config.referrer) && !config.headers.contains("referer") {
            builder = builder.header(reqwest::header::REFERER, config.referrer.as_str());
        }
        if let Some(body) = &config.body {
            builder = builder.body(body.clone());
        }

        builder.build().map_err(TransportError::from)
    }

    async fn exchange(&self, request: reqwest::Request) -> Result<HttpResponse, TransportError> {
        let response = self.inner.execute(request).await?;

        let status = response.status();
        let headers: Headers = response
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str(), String::from_utf8_lossy(value.as_bytes()).into_owned()))
            .collect();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &str, config: &RequestConfig) -> Result<HttpResponse, TransportError> {
        let request = self.prepare(url, config)?;
        match &config.signal {
            Some(signal) => tokio::select! {
                biased;
                _ = signal.aborted() => Err(TransportError::Aborted),
                result = self.exchange(request) => result,
            },
            None => self.exchange(request).await,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TransportError::InvalidRequest(err.to_string())
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

fn is_absolute_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
