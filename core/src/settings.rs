//! Instance-wide client configuration.
//!
//! # Design
//! `ClientSettings` is built once, through [`ClientSettings::builder`] or by
//! deserializing a config file, and is read-only afterwards: there are no
//! setters, and the client shares it behind an `Arc`. The fetch-style enums
//! serialize with the same kebab-case names browsers use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::abort::AbortSignal;
use crate::defaults::EXPECTED_RESPONSE_TYPES;
use crate::headers::Headers;
use crate::http::HttpMethod;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheMode {
    #[default]
    Default,
    NoStore,
    Reload,
    NoCache,
    ForceCache,
    OnlyIfCached,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    #[default]
    Cors,
    NoCors,
    SameOrigin,
    Navigate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialsMode {
    Omit,
    #[default]
    SameOrigin,
    Include,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferrerPolicy {
    NoReferrer,
    NoReferrerWhenDowngrade,
    Origin,
    OriginWhenCrossOrigin,
    SameOrigin,
    StrictOrigin,
    StrictOriginWhenCrossOrigin,
    UnsafeUrl,
}

/// Expected response content-type per method.
///
/// Methods without an override fall back to
/// [`EXPECTED_RESPONSE_TYPES`]. An override of `None` removes the
/// expectation for that method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseExpectations {
    overrides: BTreeMap<HttpMethod, Option<String>>,
}

impl ResponseExpectations {
    pub fn expect(mut self, method: HttpMethod, content_type: impl Into<String>) -> Self {
        self.overrides.insert(method, Some(content_type.into()));
        self
    }

    pub fn clear(mut self, method: HttpMethod) -> Self {
        self.overrides.insert(method, None);
        self
    }

    pub fn expected(&self, method: HttpMethod) -> Option<&str> {
        match self.overrides.get(&method) {
            Some(content_type) => content_type.as_deref(),
            None => EXPECTED_RESPONSE_TYPES.get(method),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    headers: Headers,
    cache: CacheMode,
    mode: RequestMode,
    credentials: CredentialsMode,
    referrer: String,
    referrer_policy: Option<ReferrerPolicy>,
    /// Fail with `FailedStatus` on a non-2xx response instead of handing it back
    throw_on_failed_status: bool,
    /// Return a body-less response untouched instead of inspecting its content-type
    allow_zero_length_response: bool,
    response_expectations: ResponseExpectations,
    #[serde(skip)]
    signal: Option<AbortSignal>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            headers: Headers::new(),
            cache: CacheMode::Default,
            mode: RequestMode::Cors,
            credentials: CredentialsMode::SameOrigin,
            referrer: "client".to_string(),
            referrer_policy: None,
            throw_on_failed_status: false,
            allow_zero_length_response: false,
            response_expectations: ResponseExpectations::default(),
            signal: None,
        }
    }
}

impl ClientSettings {
    pub fn builder() -> ClientSettingsBuilder {
        ClientSettingsBuilder::default()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn cache(&self) -> CacheMode {
        self.cache
    }

    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    pub fn credentials(&self) -> CredentialsMode {
        self.credentials
    }

    pub fn referrer(&self) -> &str {
        &self.referrer
    }

    pub fn referrer_policy(&self) -> Option<ReferrerPolicy> {
        self.referrer_policy
    }

    pub fn throw_on_failed_status(&self) -> bool {
        self.throw_on_failed_status
    }

    pub fn allow_zero_length_response(&self) -> bool {
        self.allow_zero_length_response
    }

    pub fn response_expectations(&self) -> &ResponseExpectations {
        &self.response_expectations
    }

    /// Default abort signal for calls that do not bring their own.
    pub fn signal(&self) -> Option<&AbortSignal> {
        self.signal.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct ClientSettingsBuilder {
    settings: ClientSettings,
}

impl ClientSettingsBuilder {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.headers.set(name, value);
        self
    }

    pub fn cache(mut self, cache: CacheMode) -> Self {
        self.settings.cache = cache;
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.settings.mode = mode;
        self
    }

    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.settings.credentials = credentials;
        self
    }

    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.settings.referrer = referrer.into();
        self
    }

    pub fn referrer_policy(mut self, policy: ReferrerPolicy) -> Self {
        self.settings.referrer_policy = Some(policy);
        self
    }

    pub fn throw_on_failed_status(mut self, enabled: bool) -> Self {
        self.settings.throw_on_failed_status = enabled;
        self
    }

    pub fn allow_zero_length_response(mut self, enabled: bool) -> Self {
        self.settings.allow_zero_length_response = enabled;
        self
    }

    pub fn response_expectations(mut self, expectations: ResponseExpectations) -> Self {
        self.settings.response_expectations = expectations;
        self
    }

    pub fn signal(mut self, signal: AbortSignal) -> Self {
        self.settings.signal = Some(signal);
        self
    }

    pub fn build(self) -> ClientSettings {
        self.settings
    }
}
