//! Request builder: merges method defaults, instance settings and per-call
//! options into the config a transport sends.
//!
//! # Design
//! `build` is a pure function. Layers apply in increasing precedence:
//!
//! 1. the method's default `Content-Type` ([`METHOD_DEFAULTS`]),
//! 2. the instance settings,
//! 3. the caller's [`RequestOptions`].
//!
//! Headers merge one by one rather than replacing the whole set, so a caller
//! adding `Authorization` keeps the JSON `Content-Type`. The method is parsed
//! from the caller's verb and written into the config directly; options
//! have no way to change it.

use serde::Serialize;
use tracing::debug;

use crate::abort::AbortSignal;
use crate::defaults::METHOD_DEFAULTS;
use crate::error::RequestError;
use crate::headers::{Headers, CONTENT_TYPE};
use crate::http::HttpMethod;
use crate::settings::{CacheMode, ClientSettings, CredentialsMode, ReferrerPolicy, RequestMode};

/// A request body before it is put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Sent as-is.
    Text(String),
    /// Serialized to compact JSON text.
    Json(serde_json::Value),
}

impl Body {
    /// Serialize any value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, RequestError> {
        serde_json::to_value(value)
            .map(Body::from)
            .map_err(RequestError::encode)
    }

    pub fn into_text(self) -> String {
        match self {
            Body::Text(text) => text,
            Body::Json(value) => value.to_string(),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<serde_json::Value> for Body {
    /// A JSON string is already text and passes through unquoted.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Body::Text(text),
            other => Body::Json(other),
        }
    }
}

/// Per-call overrides. Unset fields inherit from the client settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: Headers,
    pub cache: Option<CacheMode>,
    pub mode: Option<RequestMode>,
    pub credentials: Option<CredentialsMode>,
    pub referrer: Option<String>,
    pub referrer_policy: Option<ReferrerPolicy>,
    /// Used when the call itself passes no body
    pub body: Option<Body>,
    pub signal: Option<AbortSignal>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    pub fn cache(mut self, cache: CacheMode) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn referrer_policy(mut self, policy: ReferrerPolicy) -> Self {
        self.referrer_policy = Some(policy);
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }
}

/// Fully merged description of one request, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub method: HttpMethod,
    pub headers: Headers,
    pub cache: CacheMode,
    pub mode: RequestMode,
    pub credentials: CredentialsMode,
    pub referrer: String,
    pub referrer_policy: Option<ReferrerPolicy>,
    pub body: Option<String>,
    pub signal: Option<AbortSignal>,
    /// Copied from the settings for transports and logging; never sent.
    pub throw_on_failed_status: bool,
    /// Copied from the settings for transports and logging; never sent.
    pub allow_zero_length_response: bool,
}

/// Build the config for one call.
///
/// Fails with `InvalidMethod` if `method` is not one of the nine verbs (any
/// casing accepted). An explicit `body` wins over `options.body`.
pub fn build(
    method: &str,
    settings: &ClientSettings,
    options: RequestOptions,
    body: Option<Body>,
) -> Result<RequestConfig, RequestError> {
    let method: HttpMethod = method.parse()?;

    let mut headers = Headers::new();
    if let Some(content_type) = METHOD_DEFAULTS.get(method) {
        headers.set(CONTENT_TYPE, content_type);
    }
    headers.merge(settings.headers());
    headers.merge(&options.headers);

    let config = RequestConfig {
        method,
        headers,
        cache: options.cache.unwrap_or(settings.cache()),
        mode: options.mode.unwrap_or(settings.mode()),
        credentials: options.credentials.unwrap_or(settings.credentials()),
        referrer: options.referrer.unwrap_or_else(|| settings.referrer().to_string()),
        referrer_policy: options.referrer_policy.or(settings.referrer_policy()),
        body: body.or(options.body).map(Body::into_text),
        signal: options.signal.or_else(|| settings.signal().cloned()),
        throw_on_failed_status: settings.throw_on_failed_status(),
        allow_zero_length_response: settings.allow_zero_length_response(),
    };

    debug!(
        method = %config.method,
        headers = config.headers.len(),
        has_body = config.body.is_some(),
        "built request config"
    );
    Ok(config)
}
