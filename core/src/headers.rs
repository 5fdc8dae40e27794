//! Per-request header composition.
//!
//! # Design
//! `ApiHeaders` is an ordered name → value map so a hook can add, change or
//! drop anything, including headers this crate knows nothing about. The
//! names below are the ones the platform reads; HTTP treats them
//! case-insensitively.
//!
//! When a `HeaderHook` is installed, whatever it returns is sent as-is. Its
//! output replaces the composed set rather than being merged into it, so a
//! hook that only wants to add a header must start from the set it was given.

use std::collections::BTreeMap;
use std::future::Future;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::ApiError;

pub const SDK_NAME: &str = "SdkName";
pub const SDK_VERSION: &str = "SdkVersion";
pub const MACHINE_NAME: &str = "MachineName";
pub const APPLICATION_NAME: &str = "ApplicationName";
pub const AUTHORIZATION: &str = "Authorization";
pub const API_KEY: &str = "ApiKey";

/// Header set for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiHeaders {
    entries: BTreeMap<String, String>,
}

impl ApiHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert to a wire header map, rejecting names or values HTTP cannot carry.
    pub fn to_header_map(&self) -> Result<HeaderMap, ApiError> {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let invalid = || ApiError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ApiHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Async callback run once per outgoing request, after composition and
/// before the network exchange.
///
/// The returned set replaces the composed one entirely.
///
/// Any `Fn(ApiHeaders) -> impl Future<Output = ApiHeaders>` closure that is
/// `Send + Sync` implements this trait:
///
/// ```
/// use lockstep_sdk::{ApiHeaders, LockstepApi};
///
/// let api = LockstepApi::with_environment("sbx").with_header_hook(|mut headers: ApiHeaders| async move {
///     headers.insert("X-Correlation-Id", "abc-123");
///     headers
/// });
/// # let _ = api;
/// ```
#[async_trait]
pub trait HeaderHook: Send + Sync {
    async fn apply(&self, headers: ApiHeaders) -> ApiHeaders;
}

#[async_trait]
impl<F, Fut> HeaderHook for F
where
    F: Fn(ApiHeaders) -> Fut + Send + Sync,
    Fut: Future<Output = ApiHeaders> + Send,
{
    async fn apply(&self, headers: ApiHeaders) -> ApiHeaders {
        (self)(headers).await
    }
}
