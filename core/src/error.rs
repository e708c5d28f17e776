//! Error type returned by every fallible client operation.
//!
//! # Design
//! All failures share one shape: a classification (`ErrorKind`), a short
//! human-readable reason, the response that triggered the failure when there
//! was one, and the time the failure was observed. Callers branch on
//! `kind()`; nothing is retried or swallowed internally.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::http::HttpResponse;
use crate::transport::TransportError;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The verb is not one of the nine recognized methods. Raised before any
    /// network activity.
    InvalidMethod,
    /// A structured request body could not be serialized to JSON.
    EncodeError,
    /// The transport rejected the call (DNS, refused connection, abort).
    NetworkFailure,
    /// Opt-in: the response status was outside 200..=299.
    FailedStatus,
    /// The response content-type does not match what the method expects.
    UnexpectedContentType,
    /// The body was declared as JSON but could not be parsed.
    DecodeError,
}

#[derive(Debug, Error)]
#[error("{reason}")]
pub struct RequestError {
    kind: ErrorKind,
    reason: String,
    response: Option<HttpResponse>,
    timestamp: DateTime<Utc>,
    #[source]
    source: Option<BoxError>,
}

impl RequestError {
    fn new(kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            response: None,
            timestamp: Utc::now(),
            source: None,
        }
    }

    fn with_response(mut self, response: HttpResponse) -> Self {
        self.response = Some(response);
        self
    }

    fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub(crate) fn invalid_method(input: &str) -> Self {
        Self::new(ErrorKind::InvalidMethod, format!("invalid method: {input}"))
    }

    pub(crate) fn encode(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::EncodeError, "encode error").with_source(err)
    }

    pub(crate) fn network(err: TransportError) -> Self {
        Self::new(ErrorKind::NetworkFailure, "network failure").with_source(err)
    }

    pub(crate) fn failed_status(response: HttpResponse) -> Self {
        Self::new(ErrorKind::FailedStatus, "request failed").with_response(response)
    }

    pub(crate) fn unexpected_content_type(response: HttpResponse) -> Self {
        Self::new(ErrorKind::UnexpectedContentType, "unexpected content-type").with_response(response)
    }

    pub(crate) fn decode(err: serde_json::Error, response: Option<HttpResponse>) -> Self {
        let err = Self::new(ErrorKind::DecodeError, "decode error").with_source(err);
        match response {
            Some(response) => err.with_response(response),
            None => err,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The response that triggered the failure, if the exchange completed.
    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    pub fn into_response(self) -> Option<HttpResponse> {
        self.response
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_is_the_reason() {
        let err = RequestError::failed_status(HttpResponse::new(500));
        assert_eq!(err.to_string(), "request failed");
        assert_eq!(err.kind(), ErrorKind::FailedStatus);
        assert_eq!(err.response().map(|r| r.status), Some(500));
    }

    #[test]
    fn invalid_method_names_the_input() {
        let err = RequestError::invalid_method("FETCH");
        assert_eq!(err.reason(), "invalid method: FETCH");
        assert!(err.response().is_none());
        assert!(err.source().is_none());
    }

    #[test]
    fn network_failure_keeps_the_transport_error() {
        let err = RequestError::network(TransportError::Connection("connection refused".to_string()));
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
        assert_eq!(err.reason(), "network failure");
        assert!(err.response().is_none());
        let source = err.source().expect("transport error is the source");
        assert!(source.to_string().contains("connection refused"));
    }

    #[test]
    fn decode_error_wraps_serde_failure() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = RequestError::decode(serde_err, Some(HttpResponse::new(200)));
        assert_eq!(err.kind(), ErrorKind::DecodeError);
        assert_eq!(err.reason(), "decode error");
        assert!(err.source().is_some());
        assert!(err.into_response().is_some());
    }

    #[test]
    fn timestamp_is_recent() {
        let before = Utc::now();
        let err = RequestError::unexpected_content_type(HttpResponse::new(200));
        assert!(err.timestamp() >= before);
        assert!(err.timestamp() <= Utc::now());
    }
}
