//! JSON-oriented HTTP request helper.
//!
//! # Overview
//! Wraps a generic transport call with per-method request defaults, response
//! content-type validation and one uniform error shape. A call goes through
//! two stages:
//!
//! - [`build`] merges method defaults, instance [`ClientSettings`] and
//!   per-call [`RequestOptions`] into a [`RequestConfig`]. Pure, no I/O.
//! - [`dispatch`] hands that config to a [`Transport`] and turns the result
//!   into a [`ResponseOutcome`] or a [`RequestError`].
//!
//! [`JsonClient`] ties the two together behind one method per HTTP verb.
//!
//! # Design
//! - The transport is a trait; the core never assumes a particular HTTP
//!   library. `ReqwestTransport` is provided behind the default `reqwest`
//!   feature.
//! - Settings are frozen once built and shared by reference, so concurrent
//!   calls on one client need no coordination.
//! - No retries, timeouts or caching: cancellation is an [`AbortSignal`] the
//!   transport may honor.
//!
//! ```no_run
//! # async fn demo() -> Result<(), jsonfetch::RequestError> {
//! use jsonfetch::{ClientSettings, JsonClient, RequestOptions};
//! use serde_json::json;
//!
//! let client = JsonClient::new(ClientSettings::builder().throw_on_failed_status(true).build());
//! let created = client
//!     .post("https://api.example.com/items", json!({"name": "widget"}), None)
//!     .await?;
//! let listed = client
//!     .get("https://api.example.com/items", Some(RequestOptions::new().header("Accept", "application/json")))
//!     .await?;
//! # let _ = (created, listed);
//! # Ok(())
//! # }
//! ```

pub mod abort;
pub mod client;
pub mod defaults;
pub mod dispatch;
pub mod error;
pub mod headers;
pub mod http;
pub mod request;
#[cfg(feature = "reqwest")]
pub mod reqwest_transport;
pub mod settings;
pub mod transport;

pub use abort::{AbortController, AbortSignal};
pub use client::JsonClient;
pub use defaults::{EXPECTED_RESPONSE_TYPES, JSON_CONTENT_TYPE, METHOD_DEFAULTS};
pub use dispatch::{dispatch, validate, ResponseOutcome};
pub use error::{ErrorKind, RequestError};
pub use headers::Headers;
pub use http::{HttpMethod, HttpResponse};
pub use request::{build, Body, RequestConfig, RequestOptions};
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;
pub use settings::{
    CacheMode, ClientSettings, ClientSettingsBuilder, CredentialsMode, ReferrerPolicy, RequestMode,
    ResponseExpectations,
};
pub use transport::{Transport, TransportError};
