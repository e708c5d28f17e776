//! Response validator: runs one exchange through a transport and classifies
//! the result.
//!
//! # Design
//! Each call walks the same fixed sequence and stops at the first terminal
//! step:
//!
//! 1. transport rejected → `NetworkFailure` (no response attached)
//! 2. `throw_on_failed_status` and status outside 2xx → `FailedStatus`
//! 3. `allow_zero_length_response` and no body declared → raw response
//! 4. no `content-type` → raw response
//! 5. method has an expected type the content-type lacks → `UnexpectedContentType`
//! 6. content-type is JSON → decoded value, or `DecodeError`
//! 7. anything else → raw response
//!
//! Nothing here touches state shared between calls.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::defaults::JSON_CONTENT_TYPE;
use crate::error::RequestError;
use crate::http::{HttpMethod, HttpResponse};
use crate::request::RequestConfig;
use crate::settings::ClientSettings;
use crate::transport::Transport;

/// Successful result of one call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// The body was JSON and has been decoded.
    Json(Value),
    /// The response is handed back untouched.
    Raw(HttpResponse),
}

impl ResponseOutcome {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseOutcome::Json(value) => Some(value),
            ResponseOutcome::Raw(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ResponseOutcome::Json(value) => Some(value),
            ResponseOutcome::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> Option<HttpResponse> {
        match self {
            ResponseOutcome::Raw(response) => Some(response),
            ResponseOutcome::Json(_) => None,
        }
    }

    /// Convert a decoded value into `T`. A raw outcome is reported as
    /// `UnexpectedContentType` carrying the response.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        match self {
            ResponseOutcome::Json(value) => serde_json::from_value(value).map_err(|e| RequestError::decode(e, None)),
            ResponseOutcome::Raw(response) => Err(RequestError::unexpected_content_type(response)),
        }
    }
}

/// Send `config` to `url` through `transport` and classify what comes back.
#[tracing::instrument(level = "debug", skip_all, fields(method = %config.method, url = %url))]
pub async fn dispatch<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    config: &RequestConfig,
    settings: &ClientSettings,
) -> Result<ResponseOutcome, RequestError> {
    let response = match transport.fetch(url, config).await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "transport rejected request");
            return Err(RequestError::network(err));
        }
    };
    debug!(status = response.status, "response received");

    validate(config.method, response, settings)
}

/// Classify a completed exchange. Steps 2 through 7 of the module docs.
pub fn validate(
    method: HttpMethod,
    response: HttpResponse,
    settings: &ClientSettings,
) -> Result<ResponseOutcome, RequestError> {
    if settings.throw_on_failed_status() && !response.is_success() {
        warn!(status = response.status, "failed status");
        return Err(RequestError::failed_status(response));
    }

    if settings.allow_zero_length_response() && is_zero_length(&response) {
        debug!("zero-length response passed through");
        return Ok(ResponseOutcome::Raw(response));
    }

    let Some(content_type) = response.content_type().map(normalize_content_type) else {
        debug!("no content-type, returning raw response");
        return Ok(ResponseOutcome::Raw(response));
    };

    if let Some(expected) = settings.response_expectations().expected(method) {
        if !content_type.contains(&expected.to_ascii_lowercase()) {
            warn!(%content_type, %expected, "unexpected content-type");
            return Err(RequestError::unexpected_content_type(response));
        }
    }

    // HEAD answers never carry a body to decode.
    if method == HttpMethod::Head || !content_type.contains(JSON_CONTENT_TYPE) {
        debug!(%content_type, "returning raw response");
        return Ok(ResponseOutcome::Raw(response));
    }

    match response.json::<Value>() {
        Ok(value) => Ok(ResponseOutcome::Json(value)),
        Err(err) => {
            warn!(error = %err, "response body is not valid JSON");
            Err(RequestError::decode(err, Some(response)))
        }
    }
}

/// A missing `content-length` counts as empty; an unparsable one does not.
fn is_zero_length(response: &HttpResponse) -> bool {
    match response.header("content-length") {
        None => true,
        Some(length) => length.trim().parse::<u64>() == Ok(0),
    }
}

/// Lowercased, with a stray backslash read as the slash it was meant to be.
fn normalize_content_type(raw: &str) -> String {
    raw.trim().replace('\\', "/").to_ascii_lowercase()
}
