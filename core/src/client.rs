//! JSON-oriented HTTP client.
//!
//! # Design
//! `JsonClient` holds a transport and a frozen `ClientSettings` behind an
//! `Arc`, and carries no other state. Every verb helper is a thin wrapper
//! over [`JsonClient::request`], which builds the config and dispatches it.
//! Calls are independent and may run concurrently on the same client.

use std::sync::Arc;

use crate::dispatch::{dispatch, ResponseOutcome};
use crate::error::RequestError;
use crate::http::HttpMethod;
use crate::request::{build, Body, RequestOptions};
use crate::settings::ClientSettings;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct JsonClient<T> {
    transport: T,
    settings: Arc<ClientSettings>,
}

#[cfg(feature = "reqwest")]
impl JsonClient<crate::reqwest_transport::ReqwestTransport> {
    /// Client over the default `reqwest` transport.
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_transport(crate::reqwest_transport::ReqwestTransport::new(), settings)
    }
}

impl<T: Transport> JsonClient<T> {
    pub fn with_transport(transport: T, settings: ClientSettings) -> Self {
        Self {
            transport,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue `method` (any casing of the nine verbs) against `url`.
    ///
    /// An unknown verb fails with `InvalidMethod` before the transport is
    /// touched.
    pub async fn request(
        &self,
        method: &str,
        url: &str,
        body: Option<Body>,
        options: Option<RequestOptions>,
    ) -> Result<ResponseOutcome, RequestError> {
        let config = build(method, &self.settings, options.unwrap_or_default(), body)?;
        dispatch(&self.transport, url, &config, &self.settings).await
    }

    pub async fn get(&self, url: &str, options: Option<RequestOptions>) -> Result<ResponseOutcome, RequestError> {
        self.request(HttpMethod::Get.as_str(), url, None, options).await
    }

    pub async fn post(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: Option<RequestOptions>,
    ) -> Result<ResponseOutcome, RequestError> {
        self.request(HttpMethod::Post.as_str(), url, Some(body.into()), options).await
    }

    pub async fn put(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: Option<RequestOptions>,
    ) -> Result<ResponseOutcome, RequestError> {
        self.request(HttpMethod::Put.as_str(), url, Some(body.into()), options).await
    }

    pub async fn patch(
        &self,
        url: &str,
        body: impl Into<Body>,
        options: Option<RequestOptions>,
    ) -> Result<ResponseOutcome, RequestError> {
        self.request(HttpMethod::Patch.as_str(), url, Some(body.into()), options).await
    }

    pub async fn delete(&self, url: &str, options: Option<RequestOptions>) -> Result<ResponseOutcome, RequestError> {
        self.request(HttpMethod::Delete.as_str(), url, None, options).await
    }

    pub async fn head(&self, url: &str, options: Option<RequestOptions>) -> Result<ResponseOutcome, RequestError> {
        self.request(HttpMethod::Head.as_str(), url, None, options).await
    }

    pub async fn options(&self, url: &str, options: Option<RequestOptions>) -> Result<ResponseOutcome, RequestError> {
        self.request(HttpMethod::Options.as_str(), url, None, options).await
    }

    /// CONNECT sends a body only when one is given.
    pub async fn connect(
        &self,
        url: &str,
        body: Option<Body>,
        options: Option<RequestOptions>,
    ) -> Result<ResponseOutcome, RequestError> {
        self.request(HttpMethod::Connect.as_str(), url, body, options).await
    }

    pub async fn trace(&self, url: &str, options: Option<RequestOptions>) -> Result<ResponseOutcome, RequestError> {
        self.request(HttpMethod::Trace.as_str(), url, None, options).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::http::HttpResponse;
    use crate::transport::stub::StubTransport;

    const URL: &str = "http://localhost:3000/items";

    fn client(response: HttpResponse) -> JsonClient<StubTransport> {
        JsonClient::with_transport(StubTransport::respond(response), ClientSettings::default())
    }

    fn json_ok() -> HttpResponse {
        HttpResponse::new(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true}"#)
    }

    #[tokio::test]
    async fn every_verb_sends_its_own_method() {
        let client = client(json_ok());
        client.get(URL, None).await.unwrap();
        client.post(URL, json!({"a": 1}), None).await.unwrap();
        client.put(URL, json!({"a": 2}), None).await.unwrap();
        client.patch(URL, json!({"a": 3}), None).await.unwrap();
        client.delete(URL, None).await.unwrap();
        client.head(URL, None).await.unwrap();
        client.options(URL, None).await.unwrap();
        client.connect(URL, None, None).await.unwrap();
        client.trace(URL, None).await.unwrap();

        let methods: Vec<HttpMethod> = client.transport().calls().into_iter().map(|(_, c)| c.method).collect();
        assert_eq!(methods, HttpMethod::ALL.to_vec());
    }

    #[tokio::test]
    async fn post_sends_json_text_with_json_content_type() {
        let client = client(json_ok());
        let outcome = client.post(URL, json!({"a": 1}), None).await.unwrap();
        assert_eq!(outcome.as_json(), Some(&json!({"ok": true})));

        let (url, config) = client.transport().calls().remove(0);
        assert_eq!(url, URL);
        assert_eq!(config.body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(config.headers.get("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn connect_body_is_optional() {
        let client = client(json_ok());
        client.connect(URL, None, None).await.unwrap();
        client.connect(URL, Some("proxy-hello".into()), None).await.unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls[0].1.body, None);
        assert_eq!(calls[1].1.body.as_deref(), Some("proxy-hello"));
        assert!(!calls[1].1.headers.contains("content-type"));
    }

    #[tokio::test]
    async fn request_rejects_unknown_verbs_without_calling_transport() {
        let client = client(json_ok());
        let err = client.request("PURGE", URL, None, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMethod);
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn request_accepts_any_casing() {
        let client = client(json_ok());
        client.request("pAtCh", URL, Some("{}".into()), None).await.unwrap();
        assert_eq!(client.transport().calls()[0].1.method, HttpMethod::Patch);
    }

    #[tokio::test]
    async fn options_reach_the_transport() {
        let client = client(json_ok());
        let options = RequestOptions::new().header("Authorization", "Bearer abc");
        client.get(URL, Some(options)).await.unwrap();

        let config = &client.transport().calls()[0].1;
        assert_eq!(config.headers.get("authorization"), Some("Bearer abc"));
        assert!(!config.headers.contains("content-type"));
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_client() {
        let client = Arc::new(client(json_ok()));
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let client = Arc::clone(&client);
                tokio::spawn(async move { client.post(URL, json!({ "i": i }), None).await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().is_ok());
        }
        assert_eq!(client.transport().calls().len(), 8);
    }

    #[tokio::test]
    async fn network_failure_surfaces_through_the_client() {
        let client = JsonClient::with_transport(StubTransport::refuse(), ClientSettings::default());
        let err = client.get(URL, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
        assert!(err.response().is_none());
    }
}
