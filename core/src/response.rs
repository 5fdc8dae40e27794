//! The response envelope returned by every dispatcher call.
//!
//! # Design
//! The envelope never turns a status code into an error. A 2xx body is decoded
//! into `value`; anything else lands in `error` and the caller decides what to
//! do by looking at `status`.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::ErrorResult;

/// Status code plus payload for one HTTP exchange.
#[derive(Debug, Clone)]
pub struct LockstepResponse<T> {
    pub status: u16,
    pub value: Option<T>,
    pub error: Option<ErrorResult>,
}

impl<T> LockstepResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Consume the envelope and return the value, if any.
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T: DeserializeOwned> LockstepResponse<T> {
    /// Decode a JSON response body.
    ///
    /// An empty 2xx body decodes as JSON `null`, so `T = ()` or `Option<_>`
    /// accepts it while a struct type reports a deserialization error.
    pub fn from_json(status: u16, body: &[u8]) -> Result<Self, ApiError> {
        if !(200..300).contains(&status) {
            return Ok(Self {
                status,
                value: None,
                error: Some(ErrorResult::from_body(status, body)),
            });
        }
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_slice(body)
        }
        .map_err(|source| ApiError::Deserialization { status, source })?;
        Ok(Self {
            status,
            value: Some(value),
            error: None,
        })
    }
}

impl LockstepResponse<Bytes> {
    /// Wrap a raw body. The bytes are kept whatever the status; `error` is
    /// filled in as well when the status is not 2xx.
    pub fn from_blob(status: u16, body: Bytes) -> Self {
        let error = if (200..300).contains(&status) {
            None
        } else {
            Some(ErrorResult::from_body(status, &body))
        };
        Self {
            status,
            value: Some(body),
            error,
        }
    }
}
